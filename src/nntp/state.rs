//! NNTP session state machine (RFC 3977 §3): connect, optionally
//! authenticate, optionally select a group before article-by-number
//! commands become meaningful.

use crate::error::{ErrorKind, MailCoreResult};
use crate::raise_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NntpState {
    Disconnected,
    Connected,
    Authenticated,
    GroupSelected,
    /// `205` response to `QUIT`, or the connection was closed by the peer.
    Closed,
}

impl NntpState {
    pub fn can_transition_to(self, next: NntpState) -> bool {
        use NntpState::*;
        if next == Closed {
            return true;
        }
        matches!(
            (self, next),
            (Disconnected, Connected)
                | (Connected, Authenticated)
                | (Connected, GroupSelected)
                | (Authenticated, GroupSelected)
                | (GroupSelected, GroupSelected)
        )
    }
}

#[derive(Debug, Clone)]
pub struct NntpMachine {
    state: NntpState,
    current_group: Option<String>,
}

impl NntpMachine {
    pub fn new() -> Self {
        Self {
            state: NntpState::Disconnected,
            current_group: None,
        }
    }

    pub fn state(&self) -> NntpState {
        self.state
    }

    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    pub fn transition(&mut self, next: NntpState) -> MailCoreResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(raise_error!(
                format!("illegal NNTP state transition {:?} -> {:?}", self.state, next),
                ErrorKind::ProtocolBad
            ));
        }
        self.state = next;
        Ok(())
    }

    pub fn select_group(&mut self, group: impl Into<String>) -> MailCoreResult<()> {
        self.transition(NntpState::GroupSelected)?;
        self.current_group = Some(group.into());
        Ok(())
    }

    pub fn require_group_selected(&self) -> MailCoreResult<()> {
        if self.state != NntpState::GroupSelected {
            return Err(raise_error!(
                "command requires a selected newsgroup".to_string(),
                ErrorKind::ProtocolBad
            ));
        }
        Ok(())
    }
}

impl Default for NntpMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_then_select_group() {
        let mut m = NntpMachine::new();
        m.transition(NntpState::Connected).unwrap();
        m.select_group("comp.lang.rust").unwrap();
        assert_eq!(m.state(), NntpState::GroupSelected);
        assert_eq!(m.current_group(), Some("comp.lang.rust"));
    }

    #[test]
    fn cannot_select_group_before_connecting() {
        let mut m = NntpMachine::new();
        assert!(m.transition(NntpState::GroupSelected).is_err());
    }

    #[test]
    fn any_state_can_close() {
        let mut m = NntpMachine::new();
        m.transition(NntpState::Connected).unwrap();
        assert!(m.transition(NntpState::Closed).is_ok());
    }
}
