use serde::{Deserialize, Serialize};
use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use tasknest_core::projection::{SortOption, StatusFilter};

pub const CONFIG_FILE: &str = "tasknest.toml";
pub const ENV_PREFIX: &str = "TASKNEST_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub database_path: String,
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Status filter `list` uses when none is given
    pub default_status: StatusFilter,
    /// Ordering `list` uses when none is given
    pub default_sort: SortOption,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "tasknest.db".to_string(),
            log_level: "error".to_string(),
            default_status: StatusFilter::All,
            default_sort: SortOption::None,
        }
    }
}

impl Config {
    /// Defaults, then `tasknest.toml` in the working directory, then
    /// `TASKNEST_*` environment variables.
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
