use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::patterns::{FilePatternSet, PatternSet};

pub const CONFIG_FILE_NAME: &str = ".ksplocrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Key prefix, usually the mod name.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Maximum length of the sanitized part of a key.
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
    /// Use `<prefix>_<n>` keys instead of text-derived ones.
    #[serde(default)]
    pub numeric_tags: bool,
    /// Catalog output directory, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub separate_parts_cfg: bool,
    #[serde(default)]
    pub code_only: bool,
    #[serde(default)]
    pub cfg_only: bool,
    /// Extra cfg field names (or patterns) that hold display text.
    #[serde(default)]
    pub include_strings: Vec<String>,
    /// Code lines matching any of these are left alone.
    #[serde(default)]
    pub exclude_strings: Vec<String>,
    /// Extra file names rewritten as code.
    #[serde(default)]
    pub include_files: Vec<String>,
    #[serde(default)]
    pub exclude_files: Vec<String>,
    /// Bodies whose `<body><situation>` fields hold science results.
    #[serde(default)]
    pub celestial_bodies: Vec<String>,
}

fn default_prefix() -> String {
    "MyMod".to_string()
}

fn default_max_key_length() -> usize {
    25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            max_key_length: default_max_key_length(),
            numeric_tags: false,
            out_dir: None,
            separate_parts_cfg: false,
            code_only: false,
            cfg_only: false,
            include_strings: Vec::new(),
            exclude_strings: Vec::new(),
            include_files: Vec::new(),
            exclude_files: Vec::new(),
            celestial_bodies: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Every pattern list is compiled here so a bad regex or glob is reported
    /// before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.code_only && self.cfg_only {
            bail!("'codeOnly' and 'cfgOnly' cannot both be set");
        }
        if self.max_key_length == 0 {
            bail!("'maxKeyLength' must be greater than 0");
        }
        if self.prefix.is_empty() {
            bail!("'prefix' must not be empty");
        }
        // Keys must stay recognizable as `#<identifier>` references on later runs.
        if !self
            .prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            bail!(
                "'prefix' may only contain ASCII letters, digits and '_' (got \"{}\")",
                self.prefix
            );
        }

        PatternSet::compile(&self.include_strings)
            .context("Invalid pattern in 'includeStrings'")?;
        PatternSet::compile(&self.exclude_strings)
            .context("Invalid pattern in 'excludeStrings'")?;
        FilePatternSet::compile(&self.include_files)
            .context("Invalid pattern in 'includeFiles'")?;
        FilePatternSet::compile(&self.exclude_files)
            .context("Invalid pattern in 'excludeFiles'")?;

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

/// Load the config found by walking up from `start_dir`, or the defaults.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

/// Load an explicit config file.
pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        path: Some(path.to_path_buf()),
    })
}
