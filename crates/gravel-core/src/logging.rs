use crate::{errors::Error, Result};

/// Initialize logging/tracing for the process.
///
/// Traffic logging for individual clients is switched separately through
/// [`crate::ClientOptions::log_traffic`]; this only installs the sink.
pub fn init(service_name: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    // Default: info for our crates, warn for everything else.
    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,gravel=info,gravel_core=info,gravel_http=info,{service_name}=info"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install log subscriber: {e}")))
}
