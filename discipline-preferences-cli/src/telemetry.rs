use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn,discipline_preferences_api=info,\
                                 discipline_preferences_manager=info,\
                                 discipline_preferences=info,hyper=warn";

/// `RUST_LOG` wins over the configured filter, which wins over the default.
pub fn setup_logging(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or(DEFAULT_LOG_LEVEL)));

    // stdout belongs to the command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
