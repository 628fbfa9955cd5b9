use crate::common::*;

use crate::dto::result_table::*;
use crate::errors::report_error::*;
use crate::model::report::report_definition::*;

#[doc = r#"
    Source of scoped database sessions.

    A session is the acquired connection. Dropping it releases the connection,
    so every exit path of the caller releases exactly once.
"#]
#[async_trait]
pub trait SqlServerRepository: Send + Sync {
    type Session: ReportSession;

    async fn acquire(&self, def: &ReportDefinition) -> Result<Self::Session, ReportError>;
}

#[async_trait]
pub trait ReportSession: Send {
    #[doc = "Runs the report query and collects every row of the first result set"]
    async fn fetch_table(&mut self, def: &ReportDefinition) -> Result<ResultTable, ReportError>;
}
