// Logger wrapper around the message engine: shared sink, base tag,
// verbosity, handler fan-out and file/environment configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod conf;
pub mod error;
pub mod handler;
pub mod logger;

pub use conf::LoggerConfig;
pub use error::{ConfigError, LoggerError};
pub use handler::{Handler, LevelFilter};
pub use logger::Logger;
pub use message::{Arg, Level, Message, Options};

/// Initialise the tracing subscriber for the engine's own diagnostics.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logger=info,message=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
