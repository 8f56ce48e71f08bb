//! Shared helpers for the integration tests.

use std::sync::Once;

use fern_diagnostic::ErrorCode;
use fern_parse::SyntaxTree;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=fern_parse=debug cargo test -p fern_parse --test scenarios`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// `(position, code)` for every diagnostic of `tree`.
pub fn codes(tree: &SyntaxTree) -> Vec<(u32, ErrorCode)> {
    tree.diagnostics()
        .iter()
        .map(|d| (d.position(), d.code()))
        .collect()
}
