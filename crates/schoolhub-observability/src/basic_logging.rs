use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging, used when observability is off.
///
/// `LOG_LEVEL` (default `info`) applies to the SchoolHub crates; noisy
/// dependencies are held at `warn`. `RUST_LOG` overrides both.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!("Observability disabled, logging to console only");
    }
}

/// Filter directives shared by every subscriber setup.
pub(crate) fn default_directives(level: &str) -> String {
    format!(
        "schoolhub={level},schoolhub_core={level},schoolhub_db={level},schoolhub_cli={level},\
         tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn"
    )
}
