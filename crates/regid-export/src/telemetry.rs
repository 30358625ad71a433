//! Console logging for the exporter.
//!
//! Events are filtered through `RUST_LOG` (default `info`) and printed by
//! `tracing_subscriber::fmt` with local RFC 3339 timestamps. Library events
//! from `regid` come through the same subscriber, e.g.:
//!
//! ```bash
//! RUST_LOG=regid=debug,info regid-export
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339()),
        )
        .try_init()?;
    Ok(())
}
