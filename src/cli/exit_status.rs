use std::process::ExitCode;

use crate::core::walker::CompileSummary;

/// Process exit status of `tsjsdoc`.
///
/// `0` when every requested file was documented, `1` when at least one file
/// could not be documented (or `init` found an existing config), `2` when the
/// run itself broke: unreadable config, unwritable output, missing input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Some files produced no documentation.
    Failure,
    Error,
}

impl ExitStatus {
    pub fn for_compile(summary: &CompileSummary) -> Self {
        if summary.has_failures() {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn test_compile_with_failed_files_is_failure() {
        let mut summary = CompileSummary {
            written: vec![PathBuf::from("a.jsdoc")],
            failed: Vec::new(),
        };
        assert_eq!(ExitStatus::for_compile(&summary), ExitStatus::Success);

        summary.failed.push("b.ts: no named declaration".to_string());
        assert_eq!(ExitStatus::for_compile(&summary), ExitStatus::Failure);
    }
}
