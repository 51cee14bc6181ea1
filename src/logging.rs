use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stderr logging filtered by `RUST_LOG`, `info` when unset.
///
/// This is the diagnostic stream the editor writes its input warnings to.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(e) = result {
        eprintln!("logging already initialised: {e}");
    }
}
