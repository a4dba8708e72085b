//! Capability-interface-by-tag dispatch, adapted from NeoMutt's `mx.c`
//! `MxOps` vtable: instead of a function-pointer struct per mailbox type, a
//! tagged enum plus a trait so sync/cache code can hold "some mailbox" and
//! match on its kind only where the protocols genuinely diverge.
//!
//! Local mailbox formats (mbox/MH/Maildir), POP and notmuch are NeoMutt's
//! other `MxOps` implementors; they're out of scope here (spec: IMAP and
//! NNTP only) and are not represented as variants, since a tag with no
//! implementation would just be dead code.

use async_trait::async_trait;

use crate::error::MailCoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailboxKind {
    Imap,
    Nntp,
}

/// Operations every mailbox backend this crate supports must provide to
/// participate in sync (`crate::sync`): fetching new message identities and
/// checking the backend is still reachable. Protocol-specific operations
/// (IMAP flag sync, NNTP article posting) live on each client directly and
/// are reached by matching on [`MailboxKind`] rather than through this trait.
#[async_trait]
pub trait MxOps: Send + Sync {
    fn kind(&self) -> MailboxKind;

    /// Round-trips a no-op command to confirm the connection is alive
    /// (IMAP `NOOP`, NNTP `STAT`/`DATE`).
    async fn check_alive(&mut self) -> MailCoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_kind_is_comparable() {
        assert_eq!(MailboxKind::Imap, MailboxKind::Imap);
        assert_ne!(MailboxKind::Imap, MailboxKind::Nntp);
    }
}
