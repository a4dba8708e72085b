//! EXPUNGE / UID EXPUNGE: permanently removing `\Deleted` messages from the
//! selected mailbox.

use futures::stream::StreamExt;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::client::ImapClient;
use crate::raise_error;
use crate::sync::batcher::batch_into_wire_chunks;

impl ImapClient {
    /// Expunges every `\Deleted` message in the selected mailbox.
    pub async fn expunge(&mut self) -> MailCoreResult<()> {
        self.machine.require_selected()?;
        self.cancel.poll_cancellation()?;
        let mut stream = self
            .session
            .expunge()
            .await
            .map_err(|e| raise_error!(format!("EXPUNGE failed: {e}"), ErrorKind::ProtocolBad))?;
        while stream.next().await.is_some() {}
        Ok(())
    }

    /// Expunges only `uids`, via `UID EXPUNGE` (RFC 4315 UIDPLUS) — narrower
    /// than a bare `EXPUNGE`, which would also remove any other
    /// `\Deleted` message another client flagged concurrently. Batched and
    /// split so no single line exceeds `config.imap_max_cmdlen`.
    pub async fn uid_expunge(&mut self, uids: &[u32], config: &crate::config::ConfigView) -> MailCoreResult<()> {
        self.machine.require_selected()?;
        if !self.capabilities.supports_uidplus() {
            return Err(raise_error!(
                "server does not support UIDPLUS; use expunge() instead".to_string(),
                ErrorKind::ProtocolNo
            ));
        }
        self.cancel.poll_cancellation()?;
        if uids.is_empty() {
            return Ok(());
        }
        let chunks = batch_into_wire_chunks(uids, config.imap_max_cmdlen);
        for set in chunks {
            self.cancel.poll_cancellation()?;
            let mut stream = self
                .session
                .uid_expunge(&set)
                .await
                .map_err(|e| raise_error!(format!("UID EXPUNGE failed: {e}"), ErrorKind::ProtocolBad))?;
            while stream.next().await.is_some() {}
        }
        Ok(())
    }
}
