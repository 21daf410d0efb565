//! Tracing setup for the cabinet binary
//!
//! The subscriber is installed before the config file is read so config
//! loading can report what it found. It starts at [`DEFAULT_LEVEL`]; once
//! the config is known, [`Logging::apply_level`] swaps in the configured
//! level unless `RUST_LOG` was set.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Level used until the config file has been read
pub const DEFAULT_LEVEL: &str = "info";

/// Filter covering the binary and both cabinet crates at `level`
pub fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "cabinet={0},cabinet_cli={0},cabinet_common={0}",
        level
    ))
}

/// Handle for adjusting the installed filter
pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl Logging {
    /// Switch to the configured level; a `RUST_LOG` filter is left alone
    pub fn apply_level(&self, level: &str) -> Result<(), reload::Error> {
        if self.from_env {
            return Ok(());
        }
        self.handle.reload(level_filter(level))
    }
}

/// Build the subscriber without installing it
///
/// `env_filter` is the `RUST_LOG` filter, if any.
pub fn build<W>(
    writer: W,
    env_filter: Option<EnvFilter>,
) -> (impl Subscriber + Send + Sync + 'static, Logging)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let from_env = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| level_filter(DEFAULT_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));

    (subscriber, Logging { handle, from_env })
}

/// Install the global subscriber. Logs go to stderr; stdout carries the
/// rendered pages.
pub fn init() -> Logging {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let (subscriber, logging) = build(std::io::stderr, env_filter);
    subscriber.init();
    logging
}
