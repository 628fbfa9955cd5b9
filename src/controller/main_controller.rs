use crate::common::*;

use crate::dto::result_table::*;
use crate::enums::report_kind::*;
use crate::errors::report_error::*;
use crate::model::report::{bar_chart_spec::*, report_definition::*};
use crate::traits::{
    repository_traits::sqlserver_repository::*,
    service_traits::{chart_service::*, display_service::*},
};

#[derive(Debug, new)]
pub struct MainController<R: SqlServerRepository, C: ChartService, D: DisplayService> {
    sql_repository: R,
    chart_service: C,
    display_service: D,
    default_output_dir: PathBuf,
}

impl<R: SqlServerRepository, C: ChartService, D: DisplayService> MainController<R, C, D> {
    #[doc = r#"
        Runs one report from selection to display.

        1. Resolve the selector; an invalid or missing one fails before any connection
        2. Acquire the database session
        3. Query, sort, build and render the chart, then show it
        4. Release the session, whichever step ended the run

        # Arguments
        * `selector` - report id or letter given by the operator
        * `output` - chart path; defaults to `<output_dir>/<report id>.png`

        # Returns
        * `Result<PathBuf, ReportError>` - the written chart file
    "#]
    pub async fn main_task(
        &self,
        selector: Option<&str>,
        output: Option<&Path>,
    ) -> Result<PathBuf, ReportError> {
        let report: ReportKind = ReportKind::from_selector(selector)?;
        let def: &ReportDefinition = report.definition();

        info!(
            "Report {} selected: graph {} '{}'",
            def.id(),
            def.letter(),
            def.title()
        );

        let output_path: PathBuf = match output {
            Some(path) => path.to_path_buf(),
            None => self.default_output_dir.join(format!("{}.png", def.id())),
        };

        let mut session: R::Session = self.sql_repository.acquire(def).await?;

        let result: Result<(), ReportError> = self
            .run_with_session(&mut session, def, &output_path)
            .await;

        /* Released here on every path, before the outcome is reported */
        drop(session);

        match result {
            Ok(()) => {
                info!("[{}] report finished: {:?}", def.id(), output_path);
                Ok(output_path)
            }
            Err(e) => {
                error!("[MainController->main_task] {}", e);
                Err(e)
            }
        }
    }

    async fn run_with_session(
        &self,
        session: &mut R::Session,
        def: &ReportDefinition,
        output_path: &Path,
    ) -> Result<(), ReportError> {
        let mut table: ResultTable = session.fetch_table(def).await?;

        /* Columns are checked before the sort so a missing plot column fails the same way */
        for column in def.required_columns() {
            table.require_column(def.id(), column)?;
        }

        table.sort_by_column(def.id(), def.sort_column())?;

        let spec: BarChartSpec = BarChartSpec::from_table(def, &table)?;

        self.chart_service
            .render_bar_chart(def, &spec, output_path)
            .await?;

        self.display_service.show(def, output_path).await
    }
}
