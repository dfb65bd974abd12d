//! `revert` and `clean`: the two ways of settling `.bak` backups.

use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::BackupCommand,
    exit_status::ExitStatus,
    report::{SUCCESS_MARK, display_path},
};
use crate::{
    core::backup::{find_backups, original_path, remove_backup, restore_backup},
    utils::plural,
};

/// Copy every backup over its original and delete it.
pub fn revert(cmd: BackupCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let backups = find_backups(&args.common.root);

    for backup in &backups {
        if args.apply {
            let restored = restore_backup(backup)?;
            if args.common.verbose {
                println!("Restored {}", display_path(&restored));
            }
        } else if let Some(original) = original_path(backup) {
            println!("Would restore {}", display_path(&original));
        }
    }

    finish(backups.len(), args.apply, "Restored", "Would restore");
    Ok(ExitStatus::from_pending(!backups.is_empty(), args.apply))
}

/// Delete every backup, keeping the rewritten files.
pub fn clean(cmd: BackupCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let backups = find_backups(&args.common.root);

    for backup in &backups {
        if args.apply {
            remove_backup(backup)?;
            if args.common.verbose {
                println!("Removed {}", display_path(backup));
            }
        } else {
            println!("Would remove {}", display_path(backup));
        }
    }

    finish(backups.len(), args.apply, "Removed", "Would remove");
    Ok(ExitStatus::from_pending(!backups.is_empty(), args.apply))
}

fn finish(count: usize, apply: bool, done: &str, pending: &str) {
    if count == 0 {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            "No backup files found".green()
        );
    } else if apply {
        println!(
            "{} {} {}",
            SUCCESS_MARK.green(),
            done.green().bold(),
            plural(count, "backup", "backups")
        );
    } else {
        println!(
            "{} {}. Run with {} to proceed.",
            pending.yellow().bold(),
            plural(count, "backup", "backups"),
            "--apply".cyan()
        );
    }
}
