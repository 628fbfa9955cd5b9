use crate::common::*;

#[doc = r#"
    Reads an environment variable, falling back to `default` when it is unset or empty.

    # Arguments
    * `key` - environment variable name
    * `default` - value used when the variable is missing

    # Returns
    * `String`
"#]
fn get_env_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => {
            info!("[env_config] '{}' is not set, using '{}'", key, default);
            default.to_string()
        }
    }
}

#[doc = r#"
    Server configuration TOML path used when neither `--config` nor `SERVER_CONFIG_PATH`
    is given on the command line / in the environment.
"#]
pub static DEFAULT_SERVER_CONFIG_PATH: &str = "./config/server_config.toml";

#[doc = r#"
    Directory for the rotating log files, from `LOG_DIRECTORY` (default `logs`).
    Initialised on first access and cached afterwards.
"#]
pub static LOG_DIRECTORY: once_lazy<String> =
    once_lazy::new(|| get_env_or_default("LOG_DIRECTORY", "logs"));
