//! Logging bootstrap.
//!
//! Log lines go to stderr in both formats so stdout carries only the menu
//! and query output.

use anyhow::{anyhow, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LogConfig;

/// Install the global subscriber. `RUST_LOG` wins over `config.level`.
pub fn init(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow!("invalid log filter {:?}: {}", config.level, e))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(config.json, std::io::stderr))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;
    Ok(())
}

/// Pretty or JSON formatting layer writing to `writer`.
pub(crate) fn fmt_layer<S, W>(json: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(writer);
    if json {
        layer
            .json()
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        layer.boxed()
    }
}
