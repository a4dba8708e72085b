//! Mailbox selection and management: SELECT/EXAMINE plus the
//! CREATE/DELETE/RENAME/SUBSCRIBE/UNSUBSCRIBE/LIST/LSUB operations the
//! distilled spec's data flow implies without naming as a component
//! (`SPEC_FULL.md` §4.4 supplement).

use utf7_imap::encode_utf7_imap as encode_mailbox_name;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::client::ImapClient;
use crate::imap::state::SessionState;
use crate::raise_error;

#[derive(Debug, Clone)]
pub struct MailboxInfo {
    pub name: String,
    pub attributes: Vec<String>,
    pub delimiter: Option<char>,
}

impl ImapClient {
    /// Selects `mailbox` for read-write access, moving the session into
    /// [`SessionState::Selected`]. The name is encoded to modified UTF-7
    /// per RFC 3501 §5.1.3 before being sent.
    pub async fn select(&mut self, mailbox: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = encode_mailbox_name(mailbox.to_string());
        self.session
            .select(&encoded)
            .await
            .map_err(|e| raise_error!(format!("SELECT {mailbox} failed: {e}"), ErrorKind::ProtocolBad))?;
        self.machine.mark_selected(mailbox)
    }

    /// Selects read-only, for operations that must never risk flagging
    /// `\Seen` as a side effect (e.g. a background header-cache refresh).
    pub async fn examine(&mut self, mailbox: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = encode_mailbox_name(mailbox.to_string());
        self.session
            .examine(&encoded)
            .await
            .map_err(|e| raise_error!(format!("EXAMINE {mailbox} failed: {e}"), ErrorKind::ProtocolBad))?;
        self.machine.mark_selected(mailbox)
    }

    pub async fn create(&mut self, mailbox: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = encode_mailbox_name(mailbox.to_string());
        self.session
            .create(&encoded)
            .await
            .map_err(|e| raise_error!(format!("CREATE {mailbox} failed: {e}"), ErrorKind::ProtocolBad))
    }

    pub async fn delete(&mut self, mailbox: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = encode_mailbox_name(mailbox.to_string());
        self.session
            .delete(&encoded)
            .await
            .map_err(|e| raise_error!(format!("DELETE {mailbox} failed: {e}"), ErrorKind::ProtocolBad))
    }

    pub async fn rename(&mut self, from: &str, to: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded_from = encode_mailbox_name(from.to_string());
        let encoded_to = encode_mailbox_name(to.to_string());
        self.session
            .rename(&encoded_from, &encoded_to)
            .await
            .map_err(|e| raise_error!(format!("RENAME {from} {to} failed: {e}"), ErrorKind::ProtocolBad))
    }

    pub async fn subscribe(&mut self, mailbox: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = encode_mailbox_name(mailbox.to_string());
        self.session
            .subscribe(&encoded)
            .await
            .map_err(|e| raise_error!(format!("SUBSCRIBE {mailbox} failed: {e}"), ErrorKind::ProtocolBad))
    }

    pub async fn unsubscribe(&mut self, mailbox: &str) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = encode_mailbox_name(mailbox.to_string());
        self.session
            .unsubscribe(&encoded)
            .await
            .map_err(|e| raise_error!(format!("UNSUBSCRIBE {mailbox} failed: {e}"), ErrorKind::ProtocolBad))
    }

    /// Lists mailboxes under `reference` matching `pattern` (RFC 3501 §6.3.8).
    pub async fn list(&mut self, reference: &str, pattern: &str) -> MailCoreResult<Vec<MailboxInfo>> {
        self.machine.require_authenticated()?;
        use futures::stream::TryStreamExt;
        let names = self
            .session
            .list(Some(reference), Some(pattern))
            .await
            .map_err(|e| raise_error!(format!("LIST failed: {e}"), ErrorKind::ProtocolBad))?;
        names
            .map_ok(|name| MailboxInfo {
                name: name.name().to_string(),
                attributes: name.attributes().iter().map(|a| format!("{a:?}")).collect(),
                delimiter: name.delimiter().and_then(|d| d.chars().next()),
            })
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| raise_error!(format!("LIST stream failed: {e}"), ErrorKind::ProtocolBad))
    }

    pub async fn lsub(&mut self, reference: &str, pattern: &str) -> MailCoreResult<Vec<MailboxInfo>> {
        self.machine.require_authenticated()?;
        use futures::stream::TryStreamExt;
        let names = self
            .session
            .lsub(Some(reference), Some(pattern))
            .await
            .map_err(|e| raise_error!(format!("LSUB failed: {e}"), ErrorKind::ProtocolBad))?;
        names
            .map_ok(|name| MailboxInfo {
                name: name.name().to_string(),
                attributes: name.attributes().iter().map(|a| format!("{a:?}")).collect(),
                delimiter: name.delimiter().and_then(|d| d.chars().next()),
            })
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| raise_error!(format!("LSUB stream failed: {e}"), ErrorKind::ProtocolBad))
    }
}
