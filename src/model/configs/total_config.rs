use crate::common::*;

use crate::model::configs::{chart_config::*, rdb_config::*};

use crate::utils_modules::io_utils::*;

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct TotalConfig {
    pub sqlserver: RdbConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl TotalConfig {
    #[doc = r#"
        Reads the server configuration TOML and applies the optional connection descriptor.

        # Arguments
        * `config_path` - TOML file path (`--config` or `SERVER_CONFIG_PATH`)
        * `server_override` - `host[:port][/database]` from `--server` / `REPORT_DB_SERVER`

        # Returns
        * `anyhow::Result<TotalConfig>`
    "#]
    pub fn load(config_path: &str, server_override: Option<&str>) -> anyhow::Result<Self> {
        info!("[TotalConfig->load] reading {}", config_path);

        let mut config: TotalConfig = read_toml_from_file::<TotalConfig>(config_path)
            .with_context(|| {
                format!(
                    "[TotalConfig->load] Failed to convert the data from '{}' into the TotalConfig structure.",
                    config_path
                )
            })?;

        if let Some(descriptor) = server_override {
            config.sqlserver.apply_descriptor(descriptor)?;
        }

        config.sqlserver.validate()?;

        Ok(config)
    }
}
