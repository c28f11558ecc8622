// fairlink-api: Async gateway to the career-fair remote store (rows, blobs, auth)

pub mod error;
pub mod gateway;
pub mod offline;
pub mod query;
pub mod rest;
pub mod transport;

pub use error::Error;
pub use gateway::{Identity, RemoteGateway, Session};
pub use offline::OfflineGateway;
pub use query::{Direction, Filter, Order, Row, Select};
pub use rest::RestGateway;
pub use transport::TransportConfig;
