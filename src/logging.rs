//! Logging and tracing setup.
//!
//! The library only emits `tracing` events; binaries and tests that want to
//! see them install a subscriber through [`init_tracing`].

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: buffer events at debug, the rest at info.
pub const DEFAULT_FILTER: &str = "info,winbuf=debug";

static INIT: Once = Once::new();

/// Installs a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Only the first call has any effect. If the host already installed a
/// subscriber, that one is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true);

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .is_ok();

        info!(installed, "winbuf tracing initialized");
    });
}
