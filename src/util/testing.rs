//! Test support: one global tracing subscriber for all tests in a binary.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Install test logging once; `RUST_LOG` overrides the default `navtree=trace`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("navtree=trace"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(fmt::TestWriter::default())
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            return;
        }
        if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        info!("Test Setup complete");
    });
}
