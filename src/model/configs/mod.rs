pub mod chart_config;
pub mod rdb_config;
pub mod total_config;
