//! Environment-driven settings.

pub const LOG_ENV: &str = "ABOX_LOG";
pub const DEBUG_ENV: &str = "DEBUG";

const DEFAULT_FILTER: &str = "warn";
const DEBUG_FILTER: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Build from an arbitrary variable lookup. `ABOX_LOG` wins; otherwise
    /// `DEBUG` being set at all (even empty) selects debug output.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = match lookup(LOG_ENV) {
            Some(filter) if !filter.is_empty() => filter,
            _ if lookup(DEBUG_ENV).is_some() => DEBUG_FILTER.to_string(),
            _ => DEFAULT_FILTER.to_string(),
        };
        Config { log_filter }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}
