use anyhow::Result;

use super::{
    super::{
        args::ExtractCommand,
        exit_status::ExitStatus,
        report::{
            print_extract_summary, print_preview, print_skipped_warning, print_updated_files,
        },
    },
    load_project_config,
};
use crate::core::{RunContext, run_extract};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let mut config = load_project_config(&args.common)?.config;
    args.apply_overrides(&mut config);

    let ctx = RunContext::new(&args.common.root, config, args.common.verbose)?;
    let report = run_extract(&ctx, args.apply)?;

    if !args.apply {
        print_preview(&report.files);
    }
    if args.common.verbose {
        print_updated_files(&report.files, args.apply);
    }
    print_extract_summary(&report, args.apply);
    print_skipped_warning(report.skipped_count, args.common.verbose);

    Ok(ExitStatus::from_pending(report.has_changes(), args.apply))
}
