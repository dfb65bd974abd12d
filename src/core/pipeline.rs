//! One localization run: discover files, rewrite code then configs through a
//! single shared registry, and (in apply mode) write files and the catalog.
//!
//! All rewrites are computed in memory first. Nothing is written until every
//! file has been processed, so a failure part-way leaves the tree untouched.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{
    backup::ensure_backup,
    catalog::{load_catalog, write_catalog},
    context::RunContext,
    file_scanner::{ScanFilter, scan_files},
    registry::KeyRegistry,
    rewrite::{FileRewrite, rewrite_cfg, rewrite_code},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Code,
    Config,
}

/// A file whose content changed.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub kind: FileKind,
    pub rewrite: FileRewrite,
    /// Set in apply mode when a `.bak` copy was created for this file.
    pub backup_created: bool,
}

/// Per-group counters for the run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroupStats {
    pub scanned: usize,
    pub modified: usize,
    /// Keys first created while processing this group.
    pub new_keys: usize,
}

#[derive(Debug)]
pub struct ExtractReport {
    pub code: GroupStats,
    pub cfg: GroupStats,
    /// Modified files in processing order.
    pub files: Vec<FileResult>,
    pub registry: KeyRegistry,
    /// Entries loaded from an existing catalog.
    pub seeded: usize,
    /// Catalog files written (apply mode only).
    pub catalog_files: Vec<PathBuf>,
    /// Paths that could not be walked or read.
    pub skipped_count: usize,
}

impl ExtractReport {
    pub fn has_changes(&self) -> bool {
        !self.files.is_empty()
    }
}

pub fn run_extract(ctx: &RunContext, apply: bool) -> Result<ExtractReport> {
    let mut registry = KeyRegistry::new(ctx.key_settings());
    let seeded = load_catalog(&ctx.out_dir, &mut registry)?;

    let filter = ScanFilter {
        include_files: &ctx.include_files,
        exclude_files: &ctx.exclude_files,
        skip_dir: Some(ctx.out_dir.as_path()),
    };
    let scan = scan_files(&ctx.root_dir, &filter, ctx.verbose);

    let mut report = ExtractReport {
        code: GroupStats::default(),
        cfg: GroupStats::default(),
        files: Vec::new(),
        registry,
        seeded,
        catalog_files: Vec::new(),
        skipped_count: scan.skipped_count,
    };

    if ctx.scans_code() {
        let stats = process_group(ctx, &scan.code_files, FileKind::Code, &mut report)?;
        report.code = stats;
    }
    if ctx.scans_cfg() {
        let stats = process_group(ctx, &scan.cfg_files, FileKind::Config, &mut report)?;
        report.cfg = stats;
    }

    if apply {
        for file in &mut report.files {
            file.backup_created = ensure_backup(&file.path)?;
            fs::write(&file.path, &file.rewrite.content)
                .with_context(|| format!("Failed to write {}", file.path.display()))?;
        }
        if !report.registry.is_empty() {
            report.catalog_files = write_catalog(
                &ctx.out_dir,
                &report.registry,
                ctx.config.separate_parts_cfg,
            )?;
        }
    }

    Ok(report)
}

fn process_group(
    ctx: &RunContext,
    paths: &[PathBuf],
    kind: FileKind,
    report: &mut ExtractReport,
) -> Result<GroupStats> {
    let mut stats = GroupStats::default();
    let keys_before = report.registry.len();

    for path in paths {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                report.skipped_count += 1;
                eprintln!(
                    "{} Cannot read {}: {}",
                    "warning:".bold().yellow(),
                    path.display(),
                    e
                );
                continue;
            }
        };
        stats.scanned += 1;

        let rewrite = match kind {
            FileKind::Code => rewrite_code(&source, &ctx.exclude_strings, &mut report.registry),
            FileKind::Config => rewrite_cfg(&source, &ctx.fields, &mut report.registry),
        };
        if rewrite.is_modified() {
            stats.modified += 1;
            report.files.push(FileResult {
                path: path.clone(),
                kind,
                rewrite,
                backup_created: false,
            });
        }
    }

    stats.new_keys = report.registry.len() - keys_before;
    Ok(stats)
}
