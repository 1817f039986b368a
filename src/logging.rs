use std::env;

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when neither `RUST_LOG` nor the `log` config key is set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Picks the filter directive: `--verbose` wins, then `RUST_LOG`, then the
/// config value, then [`DEFAULT_LEVEL`].
pub fn directive(verbose: bool, configured: Option<&str>) -> String {
    pick_directive(verbose, env::var("RUST_LOG").ok(), configured)
}

fn pick_directive(verbose: bool, rust_log: Option<String>, configured: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for `--json`.
pub fn init(verbose: bool, configured: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_new(directive(verbose, configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        .add_directive(
            "sqlx=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        );

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
