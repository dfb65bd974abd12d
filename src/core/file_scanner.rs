use std::path::{Path, PathBuf};

use colored::Colorize;
use walkdir::{DirEntry, WalkDir};

use super::patterns::FilePatternSet;

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// C# sources plus files picked up by `includeFiles`, sorted.
    pub code_files: Vec<PathBuf>,
    /// Part config files, sorted.
    pub cfg_files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// File name filters applied during the walk.
pub struct ScanFilter<'a> {
    pub include_files: &'a FilePatternSet,
    pub exclude_files: &'a FilePatternSet,
    /// Directory whose contents are never scanned (the catalog output).
    pub skip_dir: Option<&'a Path>,
}

pub fn scan_files(root: &Path, filter: &ScanFilter<'_>, verbose: bool) -> ScanResult {
    let mut result = ScanResult::default();

    // Root and output directory may be spelled differently, so compare canonical paths.
    let skip_dir = filter
        .skip_dir
        .map(|dir| dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()));
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry, skip_dir.as_deref()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if filter.exclude_files.matches_file_name(&file_name) {
            continue;
        }

        match extension(entry.path()).as_deref() {
            Some("cs") => result.code_files.push(entry.into_path()),
            Some("cfg") => result.cfg_files.push(entry.into_path()),
            _ if filter.include_files.matches_file_name(&file_name) => {
                result.code_files.push(entry.into_path())
            }
            _ => {}
        }
    }

    result.code_files.sort();
    result.cfg_files.sort();
    result
}

fn is_skipped_dir(entry: &DirEntry, skip_dir: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    if entry.file_name() == ".git" {
        return true;
    }
    skip_dir.is_some_and(|dir| {
        entry.path() == dir || entry.path().canonicalize().is_ok_and(|path| path == dir)
    })
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
