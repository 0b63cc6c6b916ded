use anyhow::Result;
use tracing::debug;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Filter used when neither RUST_LOG nor the config names one
const DEFAULT_FILTER: &str = "warn";

/// Filter applied by `--verbose`
const VERBOSE_FILTER: &str = "linepatch=debug";

/// Pick the log filter. RUST_LOG wins, then `--verbose`, then the config.
pub fn filter_directive(verbose: bool, configured: Option<&str>) -> String {
    if let Ok(from_env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !from_env.trim().is_empty() {
            return from_env;
        }
    }

    if verbose {
        return VERBOSE_FILTER.to_string();
    }

    configured.unwrap_or(DEFAULT_FILTER).to_string()
}

/// Install the global subscriber. Logs go to stderr so stdout stays free for
/// diff output.
pub fn init_logging(verbose: bool, configured: Option<&str>) -> Result<()> {
    let directive = filter_directive(verbose, configured);

    fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_new(&directive)?)
        .with_target(verbose)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    debug!("Logging initialized with filter: {}", directive);
    Ok(())
}
