//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::active_path(global);
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            output::print_output(cfg.to_redacted_toml()?.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetStore { url, key, bucket } => {
            // Start from the file alone so environment overrides are not persisted.
            let mut cfg = fairlink_config::load_file(&path)?;
            cfg.store.url = Some(url);
            cfg.store.key = Some(key);
            if let Some(bucket) = bucket {
                cfg.store.bucket = bucket;
            }
            fairlink_config::save_config(&cfg, &path)?;
            if !global.quiet {
                eprintln!("Store settings saved to {}", path.display());
            }
            Ok(())
        }
    }
}
