use std::io;
use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Install a stderr subscriber for the current thread
///
/// `directive` is an `EnvFilter` directive; `RUST_LOG` takes precedence when
/// set. An unparsable directive falls back to `info`.
pub fn init_std_out_logging(directive: &str) -> DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let collector = tracing_subscriber::registry().with(
        fmt::Layer::new()
            .with_writer(io::stderr)
            .with_target(false)
            .with_filter(filter),
    );
    tracing::subscriber::set_default(collector)
}
