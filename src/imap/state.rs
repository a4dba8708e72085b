//! The session state machine and command-pipeline bookkeeping layered on
//! top of `async-imap`'s wire mechanics.
//!
//! `async-imap` already does tag generation and untagged-response parsing;
//! what it doesn't give us is the explicit state graph the protocol
//! actually has (RFC 3501 §3) or the command-logging discipline a
//! password-bearing command needs. This module owns both, and every
//! [`crate::imap::client::ImapClient`] method asserts the right
//! [`SessionState`] transition before delegating the wire work.

use crate::error::{ErrorKind, MailCoreResult};
use crate::raise_error;

/// RFC 3501 §3's four states plus the two terminal conditions a server can
/// force us into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
    Authenticated,
    Selected,
    /// Server sent `* BYE` and closed gracefully (logout, timeout).
    Bye,
    /// Connection failed in a way that isn't a clean `BYE` (reset, I/O error).
    Fatal,
}

impl SessionState {
    /// Validates that `next` is a legal transition from `self`, per the
    /// state diagram in RFC 3501 §3. Any state can fall to `Bye` or `Fatal`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        if matches!(next, Bye | Fatal) {
            return true;
        }
        matches!(
            (self, next),
            (Disconnected, Connected)
                | (Connected, Authenticated)
                | (Authenticated, Selected)
                | (Selected, Authenticated)
                | (Authenticated, Authenticated)
                | (Selected, Selected)
        )
    }
}

/// A session's current state. Owned by [`crate::imap::client::ImapClient`].
#[derive(Debug, Clone)]
pub struct SessionMachine {
    state: SessionState,
    selected_mailbox: Option<String>,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
            selected_mailbox: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_mailbox(&self) -> Option<&str> {
        self.selected_mailbox.as_deref()
    }

    pub fn transition(&mut self, next: SessionState) -> MailCoreResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(raise_error!(
                format!("illegal IMAP state transition {:?} -> {:?}", self.state, next),
                ErrorKind::ProtocolBad
            ));
        }
        if next != SessionState::Selected {
            self.selected_mailbox = None;
        }
        self.state = next;
        Ok(())
    }

    pub fn mark_selected(&mut self, mailbox: impl Into<String>) -> MailCoreResult<()> {
        self.transition(SessionState::Selected)?;
        self.selected_mailbox = Some(mailbox.into());
        Ok(())
    }

    /// Errors unless the session is in `Selected` state — the precondition
    /// for FETCH/STORE/COPY/EXPUNGE.
    pub fn require_selected(&self) -> MailCoreResult<()> {
        if self.state != SessionState::Selected {
            return Err(raise_error!(
                "command requires a selected mailbox".to_string(),
                ErrorKind::ProtocolBad
            ));
        }
        Ok(())
    }

    /// Errors unless the session is authenticated or better — the
    /// precondition for CREATE/DELETE/RENAME/SUBSCRIBE/LIST/SELECT.
    pub fn require_authenticated(&self) -> MailCoreResult<()> {
        if !matches!(self.state, SessionState::Authenticated | SessionState::Selected) {
            return Err(raise_error!(
                "command requires an authenticated session".to_string(),
                ErrorKind::ProtocolBad
            ));
        }
        Ok(())
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_then_authenticate_then_select() {
        let mut m = SessionMachine::new();
        m.transition(SessionState::Connected).unwrap();
        m.transition(SessionState::Authenticated).unwrap();
        m.mark_selected("INBOX").unwrap();
        assert_eq!(m.state(), SessionState::Selected);
        assert_eq!(m.selected_mailbox(), Some("INBOX"));
    }

    #[test]
    fn cannot_select_before_authenticated() {
        let mut m = SessionMachine::new();
        m.transition(SessionState::Connected).unwrap();
        assert!(m.transition(SessionState::Selected).is_err());
    }

    #[test]
    fn any_state_can_fall_to_bye() {
        let mut m = SessionMachine::new();
        m.transition(SessionState::Connected).unwrap();
        assert!(m.transition(SessionState::Bye).is_ok());
    }

    #[test]
    fn deselecting_clears_selected_mailbox() {
        let mut m = SessionMachine::new();
        m.transition(SessionState::Connected).unwrap();
        m.transition(SessionState::Authenticated).unwrap();
        m.mark_selected("INBOX").unwrap();
        m.transition(SessionState::Authenticated).unwrap();
        assert_eq!(m.selected_mailbox(), None);
    }

    #[test]
    fn require_selected_rejects_authenticated_only() {
        let mut m = SessionMachine::new();
        m.transition(SessionState::Connected).unwrap();
        m.transition(SessionState::Authenticated).unwrap();
        assert!(m.require_selected().is_err());
    }
}
