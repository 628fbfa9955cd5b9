use crate::common::*;

use crate::errors::report_error::*;
use crate::model::report::report_definition::*;

#[async_trait]
pub trait DisplayService: Send + Sync {
    #[doc = "Show a rendered chart, returning once the viewer has been closed"]
    async fn show(&self, def: &ReportDefinition, chart_path: &Path) -> Result<(), ReportError>;
}
