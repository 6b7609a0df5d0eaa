//! Tracing setup: structured logging with span definitions.

pub mod spans;

use std::sync::Once;

use lore_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `LORE_LOG=lore_graph=debug,info`.
pub const LOG_ENV_VAR: &str = "LORE_LOG";

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// `LORE_LOG` takes precedence over `config.log_level`. Output is JSON when
/// `config.json_logs` is set. Only the first call installs a subscriber; later
/// calls, or a subscriber installed elsewhere, leave the existing one in place.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        let _ = if config.json_logs {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init();
    });
}
