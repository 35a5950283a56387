//! Log output for the `docnav` binary.
//!
//! Outline builds, index builds and snapshot swaps log at INFO; per-query and
//! per-selection detail logs at DEBUG. Everything goes to stderr so command
//! output on stdout stays machine-readable (`--json`).

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Install the subscriber once; later calls are no-ops.
///
/// `verbose` (the CLI's `-v`) raises the default level from INFO to DEBUG, and
/// `RUST_LOG` directives still apply on top of it. Under a test runner output
/// goes through the harness's capture instead of straight to stderr.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test || verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        if is_test {
            // Some other subscriber may already be global in this process.
            let _ = builder.with_test_writer().try_init();
        } else if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
