pub mod batch;
pub mod captioner;
pub mod clients;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod prompts;
pub mod render;

pub use captioner::{Captioner, choose_model};
pub use error::{CaptionError, Result};
pub use models::{Attribute, Caption, CrossSellProduct};

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Handle to the installed subscriber's filter.
#[derive(Debug, Clone)]
pub struct LogFilter(reload::Handle<EnvFilter, Registry>);

impl LogFilter {
    /// Replace the active filter. An unparsable directive leaves it unchanged.
    pub fn set(&self, directives: &str) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => {
                let _ = self.0.reload(filter);
            }
            Err(e) => tracing::warn!("Ignoring log filter {:?}: {}", directives, e),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.0.with_current(|filter| filter.to_string()).ok()
    }
}

/// Install the stderr tracing subscriber used by the binaries.
///
/// `RUST_LOG` wins over `default_filter`. Install it before loading config so
/// config warnings are visible, then apply the configured level via the handle.
pub fn init_tracing(default_filter: &str) -> LogFilter {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let (filter, handle) = reload::Layer::new(filter);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    LogFilter(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_swaps_directives() {
        let (_layer, handle) =
            reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("product_captions=info"));
        let log = LogFilter(handle);

        log.set("product_captions=debug");
        assert_eq!(log.current().as_deref(), Some("product_captions=debug"));

        log.set("product_captions=loud");
        assert_eq!(log.current().as_deref(), Some("product_captions=debug"));
    }
}
