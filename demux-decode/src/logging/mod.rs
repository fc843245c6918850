/*!
    Logging plumbing.

    The codec library logs through a process-wide C callback; [`ffmpeg`]
    installs one that forwards each line to a [`LogSink`]. The shim's own
    events go through `tracing`, and [`LogSinkLayer`] can route those to a
    [`LogSink`] as well, for hosts without a terminal.
*/

mod ffmpeg;
mod layer;

use std::sync::Arc;

pub use self::ffmpeg::{
    LibraryLogLevel, install_ffmpeg_log_bridge, is_bridge_installed, set_library_log_level,
    severity_for_av_level,
};
pub use self::layer::LogSinkLayer;

/**
    Tag attached to lines coming from the codec library.
*/
pub const FFMPEG_TAG: &str = "FFMPEG";

/**
    Host-side severity of a log line, from least to most severe.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Verbose,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

/**
    Destination for log lines.

    Called from whatever thread produced the line, possibly from inside
    the codec library, so implementations must not block for long.
*/
pub trait LogSink: Send + Sync + 'static {
    fn log(&self, severity: Severity, tag: &str, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        (**self).log(severity, tag, message)
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        (**self).log(severity, tag, message)
    }
}

/**
    Sink that re-emits lines as `tracing` events.

    Used by the command line tool, where the `tracing` subscriber writes
    to stderr.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        match severity {
            Severity::Fatal | Severity::Error => tracing::error!(tag, "{message}"),
            Severity::Warn => tracing::warn!(tag, "{message}"),
            Severity::Info => tracing::info!(tag, "{message}"),
            Severity::Debug => tracing::debug!(tag, "{message}"),
            Severity::Verbose => tracing::trace!(tag, "{message}"),
        }
    }
}

/**
    Install the stderr `tracing` subscriber used by the command line tool.

    Verbosity comes from `RUST_LOG` and defaults to `info`. Does nothing if
    a global subscriber is already set.
*/
pub fn init_tracing() {
    use std::io::IsTerminal;

    let ansi_enabled = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(ansi_enabled)
        .try_init();
}
