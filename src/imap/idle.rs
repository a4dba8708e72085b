//! IDLE (RFC 2177): holds the connection open waiting for unsolicited
//! untagged responses (new mail, expunges from another client) instead of
//! polling with `NOOP`. Races the IDLE future against both a keepalive
//! timer and the session's `CancelToken`, mirroring the host application's
//! `utils::shutdown` cooperative-cancellation pattern.

use std::time::Duration;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::client::ImapClient;
use crate::raise_error;

/// What interrupted an IDLE wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleOutcome {
    /// The server pushed at least one untagged update; caller should NOOP
    /// or re-SELECT to learn what changed, then IDLE again.
    ServerActivity,
    /// The keepalive interval elapsed with no server activity; caller
    /// should send `DONE`, issue a `NOOP`, and re-enter IDLE.
    KeepaliveElapsed,
    /// `CancelToken::cancel()` was called; caller should send `DONE` and
    /// stop idling.
    Cancelled,
}

impl ImapClient {
    /// Enters IDLE and waits for the first of: server activity, the
    /// keepalive interval, or cancellation. Always leaves IDLE mode (sends
    /// `DONE`) before returning, even on the keepalive/cancel paths, so the
    /// session is ready for the next command regardless of outcome.
    pub async fn idle_once(&mut self, keepalive: Duration) -> MailCoreResult<IdleOutcome> {
        self.machine.require_selected()?;
        if !self.capabilities.supports_idle() {
            return Err(raise_error!(
                "server does not advertise IDLE".to_string(),
                ErrorKind::ProtocolNo
            ));
        }

        let mut idle_handle = self
            .session
            .idle()
            .await
            .map_err(|e| raise_error!(format!("IDLE failed: {e}"), ErrorKind::ProtocolBad))?;

        let cancel = self.cancel.clone();
        tokio::select! {
            result = idle_handle.wait_with_timeout(keepalive) => {
                let _ = idle_handle.done().await;
                match result {
                    Ok(async_imap::extensions::idle::IdleResponse::NewData(_)) => Ok(IdleOutcome::ServerActivity),
                    Ok(async_imap::extensions::idle::IdleResponse::Timeout) => Ok(IdleOutcome::KeepaliveElapsed),
                    Ok(async_imap::extensions::idle::IdleResponse::ManualInterrupt) => Ok(IdleOutcome::Cancelled),
                    Err(e) => Err(raise_error!(format!("IDLE wait failed: {e}"), ErrorKind::ProtocolBad)),
                }
            }
            _ = cancel.cancelled() => {
                let _ = idle_handle.done().await;
                Ok(IdleOutcome::Cancelled)
            }
        }
    }
}
