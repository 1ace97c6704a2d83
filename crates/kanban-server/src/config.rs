use chrono::NaiveTime;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use kanban_core::rollover::RolloverSchedule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE: &str = "kanban.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite database holding snapshots.
    pub database_path: String,
    pub host: String,
    pub port: u16,
    /// Upper bound on a single snapshot flush or load.
    pub flush_timeout_secs: u64,
    /// Run the daily finalize/reload triggers inside `serve`.
    pub scheduler_enabled: bool,
    /// UTC time of day at which the open day is finalized.
    pub finalize_at: NaiveTime,
    /// UTC time of day at which the new day is loaded.
    pub reload_at: NaiveTime,
}

impl Default for Config {
    fn default() -> Self {
        let schedule = RolloverSchedule::default();
        Self {
            database_path: "kanban.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            flush_timeout_secs: 10,
            scheduler_enabled: true,
            finalize_at: schedule.finalize_at,
            reload_at: schedule.reload_at,
        }
    }
}

impl Config {
    /// Defaults, then `kanban.toml`, then `PORT`, then `KANBAN_*` variables.
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Self::base()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::raw().only(&["PORT"]))
                .merge(Env::prefixed("KANBAN_")),
        )
    }

    pub fn base() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    pub fn schedule(&self) -> RolloverSchedule {
        RolloverSchedule {
            finalize_at: self.finalize_at,
            reload_at: self.reload_at,
        }
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_secs(self.flush_timeout_secs.max(1))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_figment(Config::base()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.schedule(), RolloverSchedule::default());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Config::base().merge(Toml::string(
            r#"
            database_path = "/var/lib/kanban/board.db"
            port = 8080
            finalize_at = "22:00:00"
            scheduler_enabled = false
            "#,
        ));
        let config = Config::from_figment(figment).unwrap();

        assert_eq!(config.database_path, "/var/lib/kanban/board.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.finalize_at, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(config.reload_at, RolloverSchedule::default().reload_at);
        assert!(!config.scheduler_enabled);
    }

    #[test]
    fn test_flush_timeout_never_zero() {
        let config = Config {
            flush_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.flush_timeout(), Duration::from_secs(1));
    }
}
