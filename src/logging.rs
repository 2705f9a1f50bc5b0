use crate::config::AppConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the tracing subscriber for the application.
///
/// The filter comes from `RUST_LOG` when set, falling back to the
/// configured `log_level`. `log_json` switches to structured JSON output.
pub fn init(cfg: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    if cfg.log_json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).with_target(true).init();
    }
}

/// Test-friendly initialization: captured writer, safe to call repeatedly.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
