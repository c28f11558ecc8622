//! Command dispatch: bridges CLI args -> access layer -> output formatting.

pub mod applications;
pub mod auth;
pub mod booths;
pub mod config_cmd;
pub mod events;
pub mod jobs;
pub mod mode;
pub mod profile;
pub mod util;

use fairlink_core::Fair;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Presenter;

/// Dispatch a store-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    fair: &Fair,
    global: &GlobalOpts,
    out: Presenter,
) -> Result<(), CliError> {
    match cmd {
        Command::Mode => mode::handle(fair, out),
        Command::Booths(args) => booths::handle(fair, args, global, out).await,
        Command::Jobs(args) => jobs::handle(fair, args, out).await,
        Command::Applications(args) => applications::handle(fair, args, global, out).await,
        Command::Profile(args) => profile::handle(fair, args, global, out).await,
        Command::Events(args) => events::handle(fair, args, global, out).await,
        Command::Auth(args) => auth::handle(fair, args, out).await,
        // Config and Completions are handled before a store is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
