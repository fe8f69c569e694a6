use tracing_subscriber::EnvFilter;

/// Default directives: the toolkit at `info`, noisy graphics crates quieter.
pub const DEFAULT_FILTER: &str =
    "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,cosmic_text=warn,winit=info";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `filter` when set. Calling this more
/// than once is harmless; later calls keep the first subscriber.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// [`init`] with [`DEFAULT_FILTER`].
pub fn init_default() {
    init(DEFAULT_FILTER);
}
