//! Browser console logging.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` events from this crate to the javascript console.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time() // no std::time in the browser
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false)
        .with_target(false);

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new("error,ui=debug"))
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(backend = crate::backend_url(), "Catalog UI started");
    }
}
