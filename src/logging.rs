//! Structured logging setup, adapted from the host application's logger
//! module: an env-filter-driven subscriber with an optional rolling file
//! appender layered on top of stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Handle returned by [`init`]; drop it to flush and stop the background
/// file-writer thread. Held for the process lifetime when file logging is on.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initializes the global subscriber. `log_dir` enables a daily-rolling file
/// appender in addition to stderr; pass `None` for stderr-only logging.
///
/// Must be called at most once per process; a second call is a logic error
/// in the host application, not something this crate can recover from.
pub fn init(log_dir: Option<&Path>) -> LogGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "mailcore.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            LogGuard {
                _file_guard: Some(guard),
            }
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            LogGuard { _file_guard: None }
        }
    }
}

/// Whether a logged IMAP command line should be shown verbatim or redacted
/// because it carries credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRedaction {
    /// Log the command verbatim.
    Full,
    /// Replace the command text with `*` — used for LOGIN/AUTHENTICATE.
    Password,
}

/// Renders a command line for logging, redacting it under [`LogRedaction::Password`].
pub fn redact_command(line: &str, mode: LogRedaction) -> String {
    match mode {
        LogRedaction::Full => line.to_string(),
        LogRedaction::Password => "*".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_mode_redacts() {
        assert_eq!(
            redact_command("a1 LOGIN user hunter2", LogRedaction::Password),
            "*"
        );
    }

    #[test]
    fn full_mode_passes_through() {
        assert_eq!(
            redact_command("a1 NOOP", LogRedaction::Full),
            "a1 NOOP"
        );
    }
}
