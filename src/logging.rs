//! Diagnostic logging for the CLI.
//!
//! ```bash
//! SAMPLE_JSON_LOG=debug sample-json sample -m model.json -r com.example.Page
//! SAMPLE_JSON_LOG="sample_json::resolve=trace" sample-json sample ...
//! ```
//!
//! Nothing is installed unless `SAMPLE_JSON_LOG` or `RUST_LOG` is set.
use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "SAMPLE_JSON_LOG";

/// `SAMPLE_JSON_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install a stderr subscriber so stdout stays pure JSON.
pub fn init_tracing() {
    if std::env::var_os(LOG_VAR).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
