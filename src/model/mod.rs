pub mod cli_args;
pub mod configs;
pub mod report;
