use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, nothing left to do
/// - `Failure` (1): Dry run found pending changes (run again with `--apply`)
/// - `Error` (2): Command failed (config error, unreadable catalog, write failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status for a command that may have run in dry-run mode.
    pub fn from_pending(pending: bool, apply: bool) -> Self {
        if pending && !apply {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn pending_work_fails_only_in_dry_run() {
        assert_eq!(ExitStatus::from_pending(true, false), ExitStatus::Failure);
        assert_eq!(ExitStatus::from_pending(true, true), ExitStatus::Success);
        assert_eq!(ExitStatus::from_pending(false, false), ExitStatus::Success);
    }
}
