use env_logger::Env;

pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global logger. `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .try_init();
}
