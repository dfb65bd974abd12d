pub mod backups;
pub mod extract;
pub mod init;

use anyhow::Result;
use colored::Colorize;

use super::{args::CommonArgs, report::display_path};
use crate::config::{ConfigLoadResult, load_config, load_config_file};

/// Load the explicit `--config` file, or search upwards from the root.
pub fn load_project_config(common: &CommonArgs) -> Result<ConfigLoadResult> {
    let loaded = match &common.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&common.root)?,
    };
    if common.verbose {
        match &loaded.path {
            Some(path) => eprintln!("{} using {}", "note:".bold().cyan(), display_path(path)),
            None => eprintln!(
                "{} no config file found, using defaults",
                "note:".bold().cyan()
            ),
        }
    }
    Ok(loaded)
}
