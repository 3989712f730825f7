//! Routes `tracing` output to the browser console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Default directives; the controller's own events log at debug.
const FILTER: &str = "error,ui=debug";

/// Install the console subscriber. Call once, before mounting the
/// controller.
pub fn init_logging() {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false)
        .with_line_number(true)
        // browsers disagree on ansi escapes, and std::time is
        // unavailable on wasm
        .with_ansi(false)
        .without_time();

    tracing_subscriber::registry()
        .with(EnvFilter::new(FILTER))
        .with(console_layer)
        .init();
}
