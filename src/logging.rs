use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "TASKDECK_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output. `TASKDECK_LOG` wins over `fallback`; an unparsable
/// directive falls back to `warn`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(fallback: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
