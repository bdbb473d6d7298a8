use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(config: &Config) {
    let (filter, bad) = match EnvFilter::try_new(&config.log_filter) {
        Ok(f) => (f, false),
        Err(_) => (EnvFilter::new("warn"), true),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if bad {
        tracing::warn!(filter = %config.log_filter, "ignoring invalid log filter");
    }
}
