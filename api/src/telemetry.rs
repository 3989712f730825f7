//! Tracing setup for the server binary and the test harness.

use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Compose a stderr subscriber. `default_directives` applies when
/// `RUST_LOG` is unset; request spans are emitted on close so handler
/// timings land in the log.
pub fn get_subscriber(
    default_directives: String,
) -> impl Subscriber + Sync + Send {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    let stderr_layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_span_events(fmt::format::FmtSpan::CLOSE);
    Registry::default().with(filter).with(stderr_layer)
}

/// Install the subscriber globally, bridging `log` records into tracing.
/// Must not be called twice.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("failed to install the log bridge");
    set_global_default(subscriber).expect("failed to set the subscriber");
}
