// ── Query subscriptions ──
//
// A `QueryWatch` follows one cache key. Dropping it unsubscribes.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::state::{QuerySnapshot, QueryState};

/// A subscription to one cache entry.
///
/// Provides point-in-time access via `current()` and change notification
/// via `changed()` or by converting to a `Stream`.
pub struct QueryWatch<T> {
    receiver: watch::Receiver<QueryState>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> QueryWatch<T> {
    pub(crate) fn new(receiver: watch::Receiver<QueryState>) -> Self {
        Self {
            receiver,
            _marker: PhantomData,
        }
    }

    /// The entry's state right now.
    pub fn current(&self) -> QuerySnapshot<T> {
        self.receiver.borrow().typed()
    }

    /// Wait for the next status or data change.
    /// Returns `None` if the cache has been dropped.
    pub async fn changed(&mut self) -> Option<QuerySnapshot<T>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().typed();
        Some(state)
    }

    /// Convert into a `Stream` yielding the current state and every change.
    pub fn into_stream(self) -> QueryWatchStream<T> {
        QueryWatchStream {
            inner: WatchStream::new(self.receiver),
            _marker: PhantomData,
        }
    }
}

/// `Stream` adapter backed by the entry's `watch::Receiver`.
pub struct QueryWatchStream<T> {
    inner: WatchStream<QueryState>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> Stream for QueryWatchStream<T> {
    type Item = QuerySnapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin, so projecting through `Pin::new` is fine.
        Pin::new(&mut self.inner)
            .poll_next(cx)
            .map(|state| state.map(|s| s.typed()))
    }
}
