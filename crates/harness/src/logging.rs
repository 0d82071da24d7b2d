use config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter directive string from the logging configuration
pub fn filter_directives(logging_config: &LoggingConfig) -> String {
    let mut filter = logging_config.level.clone();

    let mut modules: Vec<_> = logging_config.modules.iter().collect();
    modules.sort();
    for (module, level) in modules {
        filter.push_str(&format!(",{module}={level}"));
    }
    filter
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored so every test can
/// initialise logging on its own.
pub fn init_tracing(logging_config: &LoggingConfig) {
    let filter = EnvFilter::try_new(filter_directives(logging_config))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match logging_config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        "compact" => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
