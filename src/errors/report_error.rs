use crate::common::*;

#[doc = "Terminal failures of a report run, one variant per step that can fail"]
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("[selection] no report selected; expected one of: {expected}")]
    NoSelection { expected: String },

    #[error("[selection] unknown report '{given}'; expected one of: {expected}")]
    UnknownReport { given: String, expected: String },

    #[error("[{report}][connect] cannot reach SQL Server at {target}: {reason}")]
    Connection {
        report: String,
        target: String,
        reason: String,
    },

    #[error("[{report}][query] `{query}` failed: {reason}")]
    Query {
        report: String,
        query: String,
        reason: String,
    },

    #[error("[{report}][render] {reason}")]
    Render { report: String, reason: String },

    #[error("[{report}][display] cannot show {path:?}: {reason}")]
    Display {
        report: String,
        path: PathBuf,
        reason: String,
    },
}

impl ReportError {
    pub fn render(report: &str, reason: impl fmt::Display) -> Self {
        ReportError::Render {
            report: report.to_string(),
            reason: reason.to_string(),
        }
    }

    #[doc = "Process exit code for this failure. Configuration and other failures use 1."]
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::NoSelection { .. } | ReportError::UnknownReport { .. } => 2,
            ReportError::Connection { .. } => 3,
            ReportError::Query { .. } => 4,
            ReportError::Render { .. } => 5,
            ReportError::Display { .. } => 6,
        }
    }
}

#[doc = "Maps an error chain to the process exit code, looking for a `ReportError` anywhere in it"]
pub fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_code_value(err))
}

fn exit_code_value(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ReportError>())
        .map_or(1, ReportError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_errors_exit_with_usage_code() {
        let err: ReportError = ReportError::UnknownReport {
            given: "foo".to_string(),
            expected: "users-by-month".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(exit_code_value(&anyhow::Error::new(err)), 2);
    }

    #[test]
    fn wrapped_report_error_is_found_in_chain() {
        let err: anyhow::Error = anyhow::Error::new(ReportError::render("users-by-month", "empty"))
            .context("report run failed");
        assert_eq!(exit_code_value(&err), 5);
    }

    #[test]
    fn untyped_errors_exit_with_one() {
        let err: anyhow::Error = anyhow!("config file missing");
        assert_eq!(exit_code_value(&err), 1);
    }

    #[test]
    fn messages_name_report_and_step() {
        let err: ReportError = ReportError::Query {
            report: "transactions-by-month".to_string(),
            query: "SELECT * FROM TransactionsByMonth".to_string(),
            reason: "Invalid object name".to_string(),
        };
        let msg: String = err.to_string();
        assert!(msg.contains("transactions-by-month"));
        assert!(msg.contains("[query]"));
    }
}
