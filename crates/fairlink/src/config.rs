//! CLI glue over `fairlink-config`: picks the config file, applies
//! `--store-url` / `--store-key` overrides, and resolves the output format.
//!
//! Core never sees these types -- it receives a pre-built `StoreConfig`.

use std::path::PathBuf;

use secrecy::SecretString;

use fairlink_config::Config;
use fairlink_core::StoreConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Config file in effect: `--config` / `FAIRLINK_CONFIG`, else the platform path.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(fairlink_config::config_path)
}

/// Load file + environment layers.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(fairlink_config::load_config_from(&active_path(global))?)
}

/// Translate the loaded config + global flags into a `StoreConfig`.
///
/// This is the single boundary where CLI config types cross into core types.
pub fn store_config(cfg: &Config, global: &GlobalOpts) -> StoreConfig {
    let mut store = cfg.to_store_config();
    if let Some(ref url) = global.store_url {
        store.url = Some(url.clone());
    }
    if let Some(ref key) = global.store_key {
        store.access_key = Some(SecretString::from(key.clone()));
    }
    store
}

/// `--output` wins; otherwise `defaults.output` from config; otherwise table.
pub fn output_format(cfg: &Config, global: &GlobalOpts) -> OutputFormat {
    use clap::ValueEnum;

    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}
