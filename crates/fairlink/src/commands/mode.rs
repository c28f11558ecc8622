//! `fairlink mode`: which backend this process is using.

use serde::Serialize;

use fairlink_core::{BackendMode, Fair};

use crate::error::CliError;
use crate::output::{self, Presenter};

#[derive(Serialize)]
struct ModeReport {
    mode: BackendMode,
    store_url: Option<String>,
    bucket: String,
}

pub fn handle(fair: &Fair, out: Presenter) -> Result<(), CliError> {
    let report = ModeReport {
        mode: fair.mode(),
        store_url: match fair.mode() {
            BackendMode::Live => fair.config().url.clone(),
            BackendMode::Mock => None,
        },
        bucket: fair.config().bucket.clone(),
    };
    let rendered = output::render_single(
        out.format,
        &report,
        |r| {
            output::detail_lines(&[
                ("Mode", r.mode.to_string()),
                ("Store", output::or_dash(r.store_url.as_deref())),
                ("Bucket", r.bucket.clone()),
            ])
        },
        |r| r.mode.to_string(),
    )?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}
