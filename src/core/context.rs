use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    config::Config,
    core::{
        catalog::DEFAULT_OUT_DIR,
        fields::FieldClassifier,
        patterns::{FilePatternSet, PatternSet},
        registry::{KeyMode, KeySettings},
    },
};

/// Everything a localization run needs, resolved once up front.
///
/// Configuration is merged by the caller (CLI arguments > config file >
/// defaults); this type validates it and compiles every pattern list so a
/// bad pattern fails the run before any file is read.
#[derive(Debug)]
pub struct RunContext {
    /// Merged configuration.
    pub config: Config,

    /// Project root; every scanned file lives below it.
    pub root_dir: PathBuf,

    /// Catalog output directory.
    pub out_dir: PathBuf,

    /// Code lines that are never rewritten (from `excludeStrings`).
    pub exclude_strings: PatternSet,

    pub include_files: FilePatternSet,
    pub exclude_files: FilePatternSet,

    /// Decides which cfg fields hold display text.
    pub fields: FieldClassifier,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,
}

impl RunContext {
    pub fn new(root_dir: &Path, config: Config, verbose: bool) -> Result<Self> {
        config.validate()?;

        let out_dir = resolve_out_dir(root_dir, config.out_dir.as_deref());
        let exclude_strings = PatternSet::compile(&config.exclude_strings)
            .context("Invalid pattern in 'excludeStrings'")?;
        let include_strings = PatternSet::compile(&config.include_strings)
            .context("Invalid pattern in 'includeStrings'")?;
        let include_files = FilePatternSet::compile(&config.include_files)
            .context("Invalid pattern in 'includeFiles'")?;
        let exclude_files = FilePatternSet::compile(&config.exclude_files)
            .context("Invalid pattern in 'excludeFiles'")?;
        let fields = FieldClassifier::new(include_strings, &config.celestial_bodies);

        Ok(Self {
            config,
            root_dir: root_dir.to_path_buf(),
            out_dir,
            exclude_strings,
            include_files,
            exclude_files,
            fields,
            verbose,
        })
    }

    pub fn key_settings(&self) -> KeySettings {
        KeySettings {
            prefix: self.config.prefix.clone(),
            mode: if self.config.numeric_tags {
                KeyMode::Numeric
            } else {
                KeyMode::Sanitized
            },
            max_tail_len: self.config.max_key_length,
        }
    }

    pub fn scans_code(&self) -> bool {
        !self.config.cfg_only
    }

    pub fn scans_cfg(&self) -> bool {
        !self.config.code_only
    }
}

/// Relative output directories are resolved against the project root.
fn resolve_out_dir(root_dir: &Path, out_dir: Option<&str>) -> PathBuf {
    match out_dir {
        Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
        Some(dir) => root_dir.join(dir),
        None => root_dir.join(DEFAULT_OUT_DIR),
    }
}
