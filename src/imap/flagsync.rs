//! Flag synchronization: pushing locally changed flags back to the server
//! with `UID STORE`, batched over the message-set batcher.
//!
//! Open Question (see `DESIGN.md`): NeoMutt's `imap_sync_message` will
//! happily issue `UID STORE +FLAGS.SILENT ()` with an empty flag set when a
//! message's only local change was one this crate doesn't track (e.g. a
//! server-side keyword it dropped). We treat an empty flag delta as a no-op
//! and never send the command, since an empty `STORE` changes nothing per
//! RFC 3501 §6.4.6 and sending it would just be a wasted round trip.

use async_imap::types::Flag;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::client::ImapClient;
use crate::raise_error;
use crate::sync::batcher::batch_into_wire_chunks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Add,
    Remove,
    Replace,
}

impl StoreAction {
    fn item_prefix(self) -> &'static str {
        match self {
            StoreAction::Add => "+FLAGS.SILENT",
            StoreAction::Remove => "-FLAGS.SILENT",
            StoreAction::Replace => "FLAGS.SILENT",
        }
    }
}

/// One flag-sync unit: the UIDs this flag change applies to, and whether
/// it's an add/remove/replace of the named flags.
#[derive(Debug, Clone)]
pub struct FlagDelta {
    pub uids: Vec<u32>,
    pub flags: Vec<String>,
    pub action: StoreAction,
}

impl ImapClient {
    /// Applies `delta` via `UID STORE`, batched into the fewest ranges and
    /// split into as many commands as needed to keep each line within
    /// `config.imap_max_cmdlen`. A delta with no flags and no UIDs is a
    /// no-op, not an error.
    pub async fn apply_flag_delta(
        &mut self,
        delta: &FlagDelta,
        config: &crate::config::ConfigView,
    ) -> MailCoreResult<()> {
        self.machine.require_selected()?;
        self.cancel.poll_cancellation()?;
        if delta.uids.is_empty() || delta.flags.is_empty() {
            return Ok(());
        }
        let chunks = batch_into_wire_chunks(&delta.uids, config.imap_max_cmdlen);
        let flag_list = delta
            .flags
            .iter()
            .map(|f| format!("\\{f}"))
            .collect::<Vec<_>>()
            .join(" ");
        let query = format!("{} ({})", delta.action.item_prefix(), flag_list);

        use futures::stream::TryStreamExt;
        for set in chunks {
            self.cancel.poll_cancellation()?;
            let mut stream = self
                .session
                .uid_store(&set, &query)
                .await
                .map_err(|e| raise_error!(format!("UID STORE failed: {e}"), ErrorKind::ProtocolBad))?;
            while stream
                .try_next()
                .await
                .map_err(|e| raise_error!(format!("STORE stream error: {e}"), ErrorKind::ProtocolBad))?
                .is_some()
            {}
        }
        Ok(())
    }

    /// Marks `uids` `\Deleted` without expunging — the first half of a
    /// "trash" operation; callers decide separately whether to expunge
    /// immediately or defer (`crate::imap::expunge`).
    pub async fn mark_deleted(&mut self, uids: &[u32], config: &crate::config::ConfigView) -> MailCoreResult<()> {
        self.apply_flag_delta(
            &FlagDelta {
                uids: uids.to_vec(),
                flags: vec![imap_flag_name(Flag::Deleted)],
                action: StoreAction::Add,
            },
            config,
        )
        .await
    }
}

fn imap_flag_name(flag: Flag<'static>) -> String {
    match flag {
        Flag::Seen => "Seen".to_string(),
        Flag::Answered => "Answered".to_string(),
        Flag::Flagged => "Flagged".to_string(),
        Flag::Deleted => "Deleted".to_string(),
        Flag::Draft => "Draft".to_string(),
        Flag::Recent => "Recent".to_string(),
        Flag::MayCreate => "MayCreate".to_string(),
        Flag::Custom(name) => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_action_prefixes_match_rfc3501_syntax() {
        assert_eq!(StoreAction::Add.item_prefix(), "+FLAGS.SILENT");
        assert_eq!(StoreAction::Remove.item_prefix(), "-FLAGS.SILENT");
        assert_eq!(StoreAction::Replace.item_prefix(), "FLAGS.SILENT");
    }
}
