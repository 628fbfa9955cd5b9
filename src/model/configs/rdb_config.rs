use crate::common::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdbAuth {
    /* Trusted connection: the OS identity of the running process */
    Integrated,
    Sql,
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct RdbConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_auth")]
    pub auth: RdbAuth,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_trust_cert")]
    pub trust_cert: bool,
}

fn default_port() -> u16 {
    1433
}

fn default_database() -> String {
    String::from("master")
}

fn default_auth() -> RdbAuth {
    RdbAuth::Integrated
}

fn default_trust_cert() -> bool {
    true
}

impl RdbConfig {
    #[doc = r#"
        Applies a `host[:port][/database]` connection descriptor on top of the file settings.
        Parts that are left out keep their configured values.
    "#]
    pub fn apply_descriptor(&mut self, descriptor: &str) -> anyhow::Result<()> {
        let descriptor: &str = descriptor.trim();

        let (addr, database) = match descriptor.split_once('/') {
            Some((addr, db)) => (addr, Some(db)),
            None => (descriptor, None),
        };

        let (host, port) = match addr.rsplit_once(':') {
            Some((host, port)) => {
                let port: u16 = port.parse().map_err(|e| {
                    anyhow!(
                        "[RdbConfig->apply_descriptor] invalid port '{}' in '{}': {}",
                        port,
                        descriptor,
                        e
                    )
                })?;
                (host, Some(port))
            }
            None => (addr, None),
        };

        if host.is_empty() {
            return Err(anyhow!(
                "[RdbConfig->apply_descriptor] connection descriptor '{}' has no host",
                descriptor
            ));
        }

        self.host = host.to_string();

        if let Some(port) = port {
            self.port = port;
        }

        if let Some(db) = database.filter(|db| !db.is_empty()) {
            self.database = db.to_string();
        }

        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("[RdbConfig->validate] sqlserver.host must not be empty"));
        }

        if self.auth == RdbAuth::Sql && self.user.is_none() {
            return Err(anyhow!(
                "[RdbConfig->validate] sqlserver.auth = \"sql\" requires sqlserver.user"
            ));
        }

        Ok(())
    }

    #[doc = "host:port/database, for log lines and error messages"]
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RdbConfig {
        toml::from_str::<RdbConfig>(r#"host = "db01""#).unwrap()
    }

    #[test]
    fn defaults_match_trusted_local_connection() {
        let cfg: RdbConfig = base();
        assert_eq!(cfg.port, 1433);
        assert_eq!(cfg.database, "master");
        assert_eq!(cfg.auth, RdbAuth::Integrated);
        assert!(cfg.trust_cert);
        assert_eq!(cfg.target(), "db01:1433/master");
    }

    #[test]
    fn descriptor_overrides_only_given_parts() {
        let mut cfg: RdbConfig = base();
        cfg.apply_descriptor("reports.internal:14330/analytics").unwrap();
        assert_eq!(cfg.target(), "reports.internal:14330/analytics");

        let mut cfg: RdbConfig = base();
        cfg.apply_descriptor("other").unwrap();
        assert_eq!(cfg.target(), "other:1433/master");
    }

    #[test]
    fn descriptor_rejects_bad_port_and_empty_host() {
        let mut cfg: RdbConfig = base();
        assert!(cfg.apply_descriptor("db:notaport").is_err());
        assert!(cfg.apply_descriptor(":1433/master").is_err());
    }

    #[test]
    fn sql_auth_requires_user() {
        let mut cfg: RdbConfig = base();
        cfg.auth = RdbAuth::Sql;
        assert!(cfg.validate().is_err());
        cfg.user = Some("report_reader".to_string());
        assert!(cfg.validate().is_ok());
    }
}
