//! Cooperative cancellation, adapted from the host application's
//! `common::signal::SignalManager`: an atomic flag plus a broadcast channel
//! so long-running protocol loops (IMAP IDLE, NNTP article streaming) can
//! poll for shutdown between wire reads instead of being killed mid-write.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::error::{ErrorKind, MailCoreResult};
use crate::raise_error;

/// Shared cancellation flag for one logical operation (a session, a fetch
/// batch, an IDLE loop). Cloning shares the same underlying flag.
#[derive(Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    tx: broadcast::Sender<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(1);
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            tx,
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(ErrorKind::Cancelled)` if cancellation was requested;
    /// call between protocol steps to bail out promptly.
    pub fn poll_cancellation(&self) -> MailCoreResult<()> {
        if self.is_cancelled() {
            return Err(raise_error!("operation cancelled".to_string(), ErrorKind::Cancelled));
        }
        Ok(())
    }

    /// Resolves once [`cancel`](Self::cancel) is called; races against this
    /// in a `tokio::select!` alongside the actual protocol future.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        let mut rx = self.tx.subscribe();
        let _ = rx.recv().await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancel_unblocks_waiters() {
        let token = CancelToken::new();
        assert!(token.poll_cancellation().is_ok());
        let waiter = token.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
        });
        token.cancel();
        handle.await.unwrap();
        assert!(token.poll_cancellation().is_err());
    }
}
