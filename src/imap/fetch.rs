//! FETCH: pulling envelopes, flags, and bodies for a batch of UIDs. Wraps
//! `async-imap`'s fetch stream and re-keys results back onto the UIDs the
//! caller asked for, since the server is free to answer out of order.

use std::collections::HashMap;

use futures::stream::TryStreamExt;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::client::ImapClient;
use crate::mime::parser::parse_message;
use crate::mime::Email;
use crate::raise_error;
use crate::sync::batcher::batch_into_wire_chunks;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MessageFlags {
    pub seen: bool,
    pub answered: bool,
    pub flagged: bool,
    pub deleted: bool,
    pub draft: bool,
    pub recent: bool,
    pub keywords: Vec<String>,
}

impl MessageFlags {
    pub fn from_imap(flags: &[async_imap::types::Flag<'_>]) -> Self {
        let mut out = MessageFlags::default();
        for f in flags {
            match f {
                async_imap::types::Flag::Seen => out.seen = true,
                async_imap::types::Flag::Answered => out.answered = true,
                async_imap::types::Flag::Flagged => out.flagged = true,
                async_imap::types::Flag::Deleted => out.deleted = true,
                async_imap::types::Flag::Draft => out.draft = true,
                async_imap::types::Flag::Recent => out.recent = true,
                async_imap::types::Flag::MayCreate => {}
                async_imap::types::Flag::Custom(name) => out.keywords.push(name.to_string()),
            }
        }
        out
    }
}

pub struct FetchedMessage {
    pub uid: u32,
    pub flags: MessageFlags,
    pub email: Option<Email>,
}

impl ImapClient {
    /// Fetches full RFC 822 bodies and flags for `uids`, batching them into
    /// as few `UID FETCH` ranges as the set allows and splitting into
    /// multiple commands whenever a line would exceed `config.imap_max_cmdlen`
    /// (`crate::sync::batcher`). Returns results keyed by the UID requested,
    /// in no particular order; callers that need input order should re-key
    /// by `uid` themselves.
    pub async fn fetch_full(
        &mut self,
        uids: &[u32],
        config: &crate::config::ConfigView,
    ) -> MailCoreResult<Vec<FetchedMessage>> {
        self.machine.require_selected()?;
        self.cancel.poll_cancellation()?;
        if uids.is_empty() {
            return Ok(Vec::new());
        }
        let chunks = batch_into_wire_chunks(uids, config.imap_max_cmdlen);

        let mut out = Vec::new();
        for set in chunks {
            self.cancel.poll_cancellation()?;
            let mut stream = self
                .session
                .uid_fetch(&set, "(UID FLAGS RFC822)")
                .await
                .map_err(|e| raise_error!(format!("UID FETCH failed: {e}"), ErrorKind::ProtocolBad))?;

            while let Some(item) = stream
                .try_next()
                .await
                .map_err(|e| raise_error!(format!("FETCH stream error: {e}"), ErrorKind::ProtocolBad))?
            {
                let uid = item.uid.unwrap_or(0);
                let flags = MessageFlags::from_imap(&item.flags().collect::<Vec<_>>());
                let email = item
                    .body()
                    .map(|raw| parse_message(raw, config))
                    .transpose()?;
                out.push(FetchedMessage { uid, flags, email });
            }
        }
        Ok(out)
    }

    /// Fetches only flags, for a periodic flag-refresh pass that doesn't
    /// need to re-download bodies already in the local cache.
    pub async fn fetch_flags(
        &mut self,
        uids: &[u32],
        config: &crate::config::ConfigView,
    ) -> MailCoreResult<HashMap<u32, MessageFlags>> {
        self.machine.require_selected()?;
        self.cancel.poll_cancellation()?;
        if uids.is_empty() {
            return Ok(HashMap::new());
        }
        let chunks = batch_into_wire_chunks(uids, config.imap_max_cmdlen);

        let mut out = HashMap::new();
        for set in chunks {
            self.cancel.poll_cancellation()?;
            let mut stream = self
                .session
                .uid_fetch(&set, "(UID FLAGS)")
                .await
                .map_err(|e| raise_error!(format!("UID FETCH FLAGS failed: {e}"), ErrorKind::ProtocolBad))?;

            while let Some(item) = stream
                .try_next()
                .await
                .map_err(|e| raise_error!(format!("FETCH stream error: {e}"), ErrorKind::ProtocolBad))?
            {
                let uid = item.uid.unwrap_or(0);
                out.insert(uid, MessageFlags::from_imap(&item.flags().collect::<Vec<_>>()));
            }
        }
        Ok(out)
    }
}
