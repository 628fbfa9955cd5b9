use crate::common::*;

use crate::errors::report_error::*;
use crate::model::report::report_definition::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    UsersByMonth,
    TransactionsByMonth,
    TransactionsByProduct,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::UsersByMonth,
        ReportKind::TransactionsByMonth,
        ReportKind::TransactionsByProduct,
    ];

    pub fn definition(self) -> &'static ReportDefinition {
        match self {
            ReportKind::UsersByMonth => &USERS_BY_MONTH,
            ReportKind::TransactionsByMonth => &TRANSACTIONS_BY_MONTH,
            ReportKind::TransactionsByProduct => &TRANSACTIONS_BY_PRODUCT,
        }
    }

    #[doc = r#"
        Resolves the operator's selector into a report.

        Accepts the report id (`users-by-month`) or its graph letter (`A`),
        case-insensitively. A missing selector is a usage error rather than
        a silent default.
    "#]
    pub fn from_selector(selector: Option<&str>) -> Result<Self, ReportError> {
        match selector.map(str::trim).filter(|s| !s.is_empty()) {
            Some(given) => given.parse::<ReportKind>(),
            None => Err(ReportError::NoSelection {
                expected: Self::expected_ids(),
            }),
        }
    }

    fn expected_ids() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.definition().id())
            .collect::<Vec<&str>>()
            .join(" | ")
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| {
                let def: &ReportDefinition = kind.definition();
                def.id().eq_ignore_ascii_case(s)
                    || (s.chars().count() == 1
                        && s.chars().all(|c| c.eq_ignore_ascii_case(&def.letter())))
            })
            .ok_or_else(|| ReportError::UnknownReport {
                given: s.to_string(),
                expected: Self::expected_ids(),
            })
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().id())
    }
}
