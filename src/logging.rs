/// Logging setup
///
/// `RUST_LOG` overrides the default filter, e.g. `RUST_LOG=media_organizer=debug`.
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "media_organizer=info";

/// Install the global tracing subscriber. Failure leaves logging disabled
/// but never stops the application.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Failed to initialize logging: {}", err);
    }
}
