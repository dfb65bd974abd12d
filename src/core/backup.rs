//! `.bak` copies of rewritten files.
//!
//! A backup is taken the first time a file is rewritten and never
//! overwritten afterwards, so it always holds the pre-localization source.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

pub const BACKUP_EXTENSION: &str = "bak";

/// `Part.cs` -> `Part.cs.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}

/// The file a backup was taken from, or `None` if `path` is not a backup.
pub fn original_path(path: &Path) -> Option<PathBuf> {
    let is_backup = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(BACKUP_EXTENSION));
    is_backup.then(|| path.with_extension(""))
}

/// Copy `path` to its backup unless a backup already exists.
///
/// Returns whether a new backup was created.
pub fn ensure_backup(path: &Path) -> Result<bool> {
    let backup = backup_path(path);
    if backup.exists() {
        return Ok(false);
    }
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to create backup {}", backup.display()))?;
    Ok(true)
}

/// Every backup file under `root`, sorted.
pub fn find_backups(root: &Path) -> Vec<PathBuf> {
    let mut backups: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| original_path(path).is_some())
        .collect();
    backups.sort();
    backups
}

/// Copy a backup over its original and delete the backup.
///
/// Returns the restored file.
pub fn restore_backup(backup: &Path) -> Result<PathBuf> {
    let original = original_path(backup)
        .with_context(|| format!("Not a backup file: {}", backup.display()))?;
    fs::copy(backup, &original)
        .with_context(|| format!("Failed to restore {}", original.display()))?;
    remove_backup(backup)?;
    Ok(original)
}

pub fn remove_backup(backup: &Path) -> Result<()> {
    fs::remove_file(backup).with_context(|| format!("Failed to remove {}", backup.display()))
}
