//! COPY/UID COPY, the wire-level half of the message-copy engine. The
//! higher-level "copy this message, preserving flags and handling Fcc
//! comma-lists" logic lives in `crate::compose::send`; this just issues the
//! command, batched.

use futures::stream::StreamExt;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::client::ImapClient;
use crate::raise_error;
use crate::sync::batcher::batch_into_wire_chunks;

impl ImapClient {
    /// Copies `uids` from the currently selected mailbox into `target`,
    /// using `UIDPLUS`'s `COPYUID` response to report the new UIDs when the
    /// server supports it (empty otherwise — the caller must re-sync
    /// `target` to discover them). Batched and split so no single `UID COPY`
    /// line exceeds `config.imap_max_cmdlen`.
    pub async fn uid_copy(
        &mut self,
        uids: &[u32],
        target: &str,
        config: &crate::config::ConfigView,
    ) -> MailCoreResult<()> {
        self.machine.require_selected()?;
        self.cancel.poll_cancellation()?;
        if uids.is_empty() {
            return Ok(());
        }
        let chunks = batch_into_wire_chunks(uids, config.imap_max_cmdlen);
        let encoded_target = utf7_imap::encode_utf7_imap(target.to_string());

        for set in chunks {
            self.cancel.poll_cancellation()?;
            let mut stream = self
                .session
                .uid_copy(&set, &encoded_target)
                .await
                .map_err(|e| raise_error!(format!("UID COPY failed: {e}"), ErrorKind::ProtocolBad))?;
            while stream.next().await.is_some() {}
        }
        Ok(())
    }

    /// `MOVE` (RFC 6851) if the server advertises it, falling back to
    /// copy-then-mark-deleted otherwise (`crate::imap::flagsync::mark_deleted`,
    /// expunge left to the caller).
    pub async fn uid_move(
        &mut self,
        uids: &[u32],
        target: &str,
        config: &crate::config::ConfigView,
    ) -> MailCoreResult<()> {
        self.machine.require_selected()?;
        if self.capabilities.has("MOVE") {
            let chunks = batch_into_wire_chunks(uids, config.imap_max_cmdlen);
            let encoded_target = utf7_imap::encode_utf7_imap(target.to_string());
            for set in chunks {
                self.cancel.poll_cancellation()?;
                let mut stream = self
                    .session
                    .uid_mv(&set, &encoded_target)
                    .await
                    .map_err(|e| raise_error!(format!("UID MOVE failed: {e}"), ErrorKind::ProtocolBad))?;
                while stream.next().await.is_some() {}
            }
            Ok(())
        } else {
            self.uid_copy(uids, target, config).await?;
            self.mark_deleted(uids, config).await
        }
    }
}
