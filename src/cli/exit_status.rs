use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed successfully
/// - `Failure` (1): Extraction failed (a file could not be processed)
/// - `Error` (2): Command failed due to internal error (config error, bad arguments, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// Extraction failed for at least one file.
    Failure,
    /// Command failed due to internal error (config error, bad arguments, etc.).
    Error,
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

    // ExitCode has no PartialEq; compare debug renderings instead.
    fn rendered(status: ExitStatus) -> String {
        format!("{:?}", ExitCode::from(status))
    }

    #[test]
    fn exit_code_values() {
        assert_eq!(rendered(ExitStatus::Success), format!("{:?}", ExitCode::from(0)));
        assert_eq!(rendered(ExitStatus::Failure), format!("{:?}", ExitCode::from(1)));
        assert_eq!(rendered(ExitStatus::Error), format!("{:?}", ExitCode::from(2)));
    }
}
