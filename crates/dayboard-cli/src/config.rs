use dayboard_core::config::{EngineConfig, StoreConfig};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "dayboard.toml";

/// Layered settings: built-in defaults, then `dayboard.toml`, then
/// `DAYBOARD_*` environment variables (`DAYBOARD_ENGINE__MAX_WINDOW_DAYS`
/// reaches into the `engine` table).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: String,
    /// Default tracing filter; `RUST_LOG` wins when set.
    pub log_level: String,
    pub max_connections: u32,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for Config {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            database_path: store.database_path,
            log_level: "warn".to_string(),
            max_connections: store.max_connections,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("DAYBOARD_").split("__"))
    }

    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            database_path: self.database_path.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers() {
        figment::Jail::expect_with(|jail| {
            let config = Config::new()?;
            assert_eq!(config, Config::default());

            jail.create_file(
                CONFIG_FILE,
                r#"
                database_path = "boards/me.db"
                [engine]
                max_window_days = 14
                "#,
            )?;
            let config = Config::new()?;
            assert_eq!(config.database_path, "boards/me.db");
            assert_eq!(config.engine.max_window_days, Some(14));

            jail.set_env("DAYBOARD_DATABASE_PATH", "/tmp/other.db");
            jail.set_env("DAYBOARD_ENGINE__MAX_WINDOW_DAYS", "31");
            let config = Config::new()?;
            assert_eq!(config.store().database_path, "/tmp/other.db");
            assert_eq!(config.engine.max_window_days, Some(31));
            assert_eq!(config.log_level, "warn");
            Ok(())
        });
    }
}
