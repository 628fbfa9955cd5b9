use crate::common::*;

#[derive(Debug, Parser)]
#[command(name = "fetch_graphs")]
#[command(about = "Run one SQL Server aggregation report and draw it as a bar chart")]
#[command(version)]
pub struct CliArgs {
    #[arg(
        value_name = "REPORT",
        help = "Report to run: users-by-month | transactions-by-month | transactions-by-product (or A, B, C)"
    )]
    pub report: Option<String>,

    #[arg(long, env = "SERVER_CONFIG_PATH", help = "Path to the server configuration TOML")]
    pub config: Option<String>,

    #[arg(
        long,
        env = "REPORT_DB_SERVER",
        value_name = "HOST[:PORT][/DATABASE]",
        help = "Override the SQL Server connection descriptor"
    )]
    pub server: Option<String>,

    #[arg(long, short, value_name = "PATH", help = "Chart output file (.png or .svg)")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Open the chart in a viewer and wait for the viewer command to exit")]
    pub show: bool,

    #[arg(long, help = "List the available reports and exit")]
    pub list: bool,
}
