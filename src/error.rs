//! Crate-wide error type.
//!
//! One enum, one `ErrorKind` discriminant, one macro to raise it — the same
//! shape used throughout this crate instead of ad hoc `Err(...)` construction
//! at call sites.

use snafu::{Location, Snafu};

pub type MailCoreResult<T> = Result<T, MailCoreError>;

/// Coarse classification of a failure, attached to every [`MailCoreError`]
/// so callers can decide retry/abort policy without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Underlying socket/filesystem I/O failed.
    Io,
    /// Server returned NO/BAD or a malformed reply to a command we sent correctly.
    ProtocolBad,
    /// Server rejected a request we expected to be accepted (e.g. NNTP 4xx/5xx).
    ProtocolNo,
    /// Malformed input on our side of the wire: headers, MIME structure, wire syntax.
    Parse,
    /// Authentication was attempted and refused.
    Auth,
    /// TLS handshake or certificate validation failed.
    Tls,
    /// Operation was cancelled cooperatively (see [`crate::signal`]).
    Cancelled,
    /// Operation ran past its configured timeout.
    Aborted,
}

#[derive(Debug, Snafu)]
#[snafu(display("{message} ({kind:?}) at {location}"))]
pub struct MailCoreError {
    pub message: String,
    pub kind: ErrorKind,
    #[snafu(implicit)]
    pub location: Location,
}

impl MailCoreError {
    pub fn new(message: impl Into<String>, kind: ErrorKind, location: Location) -> Self {
        Self {
            message: message.into(),
            kind,
            location,
        }
    }
}

/// Builds a [`MailCoreError`] with the call site's location captured automatically.
#[macro_export]
macro_rules! raise_error {
    ($msg:expr, $kind:expr) => {
        $crate::error::MailCoreError::new($msg, $kind, snafu::location!())
    };
}

impl From<std::io::Error> for MailCoreError {
    fn from(e: std::io::Error) -> Self {
        raise_error!(e.to_string(), ErrorKind::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_error_carries_kind() {
        let err = raise_error!("boom".to_string(), ErrorKind::Parse);
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn io_error_converts_to_io_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MailCoreError = io.into();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
