/*
Author      : Seunghwan Shin
Create date : 2025-11-00
Description : Runs one of the fixed SQL Server aggregation reports and draws it as a bar chart

History     : 2025-11-00 Seunghwan Shin       # [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod dto;
mod enums;
mod errors;
mod traits;

mod env_configuration;
use env_configuration::env_config::*;

mod model;
use model::{cli_args::*, configs::total_config::*};

mod repository;
use repository::sqlserver_repository_impl::*;

mod service;
use service::{chart_service_impl::*, display_service_impl::*};

mod utils_modules;
use utils_modules::logger_utils::*;

mod controller;
use controller::main_controller::*;

use enums::report_kind::*;
use errors::report_error::*;

#[doc = "Prints the report ids, graph letters and titles"]
fn print_report_list() {
    for kind in ReportKind::ALL {
        let def = kind.definition();
        println!("{}  {:<24} {}", def.letter(), def.id(), def.title());
    }
}

async fn run(cli: CliArgs) -> anyhow::Result<PathBuf> {
    /* Selection is resolved before configuration so a bad selector never reaches the database */
    let report: ReportKind = ReportKind::from_selector(cli.report.as_deref())?;

    let config_path: String = cli
        .config
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVER_CONFIG_PATH.to_string());

    let total_config: TotalConfig = TotalConfig::load(&config_path, cli.server.as_deref())?;

    /* Dependency injection */
    let sql_repository: SqlServerRepositoryImpl =
        SqlServerRepositoryImpl::new(total_config.sqlserver())
            .context("[main] An issue occurred while initializing the SQL Server repository.")?;
    let chart_service: ChartServiceImpl = ChartServiceImpl::new(total_config.chart().clone());
    let display_service: DisplayServiceImpl =
        DisplayServiceImpl::new(total_config.chart().viewer().clone(), cli.show);

    let main_controller: MainController<
        SqlServerRepositoryImpl,
        ChartServiceImpl,
        DisplayServiceImpl,
    > = MainController::new(
        sql_repository,
        chart_service,
        display_service,
        PathBuf::from(total_config.chart().output_dir()),
    );

    let chart_path: PathBuf = main_controller
        .main_task(Some(report.definition().id()), cli.output.as_deref())
        .await?;

    Ok(chart_path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli: CliArgs = CliArgs::parse();

    if cli.list {
        print_report_list();
        return ExitCode::SUCCESS;
    }

    /* Global logger */
    let _logger: LoggerHandle = match set_global_logger() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("[main] failed to start the logger: {:#}", e);
            return ExitCode::from(1);
        }
    };

    info!("fetch_graphs start!");

    match run(cli).await {
        Ok(chart_path) => {
            println!("{}", chart_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}
