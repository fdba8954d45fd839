use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Output goes to stderr so stdout stays
/// clean for JSON reports. A non-empty `RUST_LOG` replaces the default levels.
pub fn initialize_logging(verbose: bool) {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), verbose);

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn build_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(directives) = directives.map(str::trim).filter(|d| !d.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }

    let level = if verbose { "debug" } else { "info" };
    EnvFilter::new(format!("textframe={level},textframe_vision={level}"))
}
