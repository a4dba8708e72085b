//! Top-level IMAP client: connects, authenticates, and exposes the
//! protocol operations as typed methods instead of raw command strings.
//! Adapted from the host application's `imap::client`/`imap::executor`
//! pair, collapsed into one type since this crate has no connection-pool
//! manager of its own to split the responsibility against.

use async_imap::types::Capability as ImapCrateCapability;
use async_imap::Session;

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::capability::CapabilitySet;
use crate::imap::state::{SessionMachine, SessionState};
use crate::mailbox::account::{AccountConfig, Credentials, TlsMode};
use crate::mailbox::connection::{self, MailStream};
use crate::raise_error;
use crate::signal::CancelToken;

pub struct ImapClient {
    pub(crate) session: Session<MailStream>,
    pub(crate) machine: SessionMachine,
    pub(crate) capabilities: CapabilitySet,
    pub(crate) cancel: CancelToken,
}

impl ImapClient {
    /// Connects, performs `STARTTLS` if the account calls for it, and logs
    /// in, leaving the session in [`SessionState::Authenticated`].
    pub async fn connect(account: &AccountConfig, cancel: CancelToken) -> MailCoreResult<Self> {
        let mut machine = SessionMachine::new();
        let stream = connection::connect(account).await?;
        machine.transition(SessionState::Connected)?;

        let mut client = async_imap::Client::new(stream);
        let greeting = client
            .read_response()
            .await
            .ok_or_else(|| raise_error!("server closed connection before greeting".to_string(), ErrorKind::Io))?
            .map_err(|e| raise_error!(format!("failed to read greeting: {e}"), ErrorKind::ProtocolBad))?;
        let _ = greeting;

        let raw_caps = client
            .capabilities()
            .await
            .map_err(|e| raise_error!(format!("CAPABILITY failed: {e}"), ErrorKind::ProtocolBad))?;
        let capabilities = capabilities_from_imap(&raw_caps);

        let client = if matches!(account.tls, TlsMode::StartTls) {
            if !capabilities.supports_starttls() {
                return Err(raise_error!(
                    "server did not advertise STARTTLS".to_string(),
                    ErrorKind::Tls
                ));
            }
            let upgraded = client
                .run_command_and_check_ok("STARTTLS", None)
                .await
                .map_err(|e| raise_error!(format!("STARTTLS failed: {e}"), ErrorKind::Tls))?;
            let _ = upgraded;
            client
        } else {
            client
        };

        let session = authenticate(client, account).await?;
        machine.transition(SessionState::Authenticated)?;

        Ok(Self {
            session,
            machine,
            capabilities,
            cancel,
        })
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub async fn logout(mut self) -> MailCoreResult<()> {
        self.session
            .logout()
            .await
            .map_err(|e| raise_error!(format!("LOGOUT failed: {e}"), ErrorKind::ProtocolBad))?;
        self.machine.transition(SessionState::Bye)?;
        Ok(())
    }
}

async fn authenticate(
    client: async_imap::Client<MailStream>,
    account: &AccountConfig,
) -> MailCoreResult<Session<MailStream>> {
    match &account.credentials {
        Credentials::Plain { user, password } => client
            .login(user, password)
            .await
            .map_err(|(e, _)| raise_error!(format!("LOGIN failed: {e}"), ErrorKind::Auth)),
        Credentials::OAuthBearer { user, token } => {
            let auth = XOAuth2 {
                user: user.clone(),
                token: token.clone(),
            };
            client
                .authenticate("XOAUTH2", auth)
                .await
                .map_err(|(e, _)| raise_error!(format!("XOAUTH2 failed: {e}"), ErrorKind::Auth))
        }
        Credentials::Anonymous => Err(raise_error!(
            "IMAP requires credentials; anonymous access is not part of RFC 3501".to_string(),
            ErrorKind::Auth
        )),
    }
}

struct XOAuth2 {
    user: String,
    token: String,
}

impl async_imap::Authenticator for XOAuth2 {
    type Response = String;

    fn process(&mut self, _challenge: &[u8]) -> Self::Response {
        format!("user={}\x01auth=Bearer {}\x01\x01", self.user, self.token)
    }
}

fn capabilities_from_imap(caps: &async_imap::types::Capabilities) -> CapabilitySet {
    let mut line = String::from("CAPABILITY");
    for cap in caps.iter() {
        line.push(' ');
        match cap {
            ImapCrateCapability::Imap4rev1 => line.push_str("IMAP4rev1"),
            ImapCrateCapability::Auth(mechanism) => {
                line.push_str("AUTH=");
                line.push_str(mechanism);
            }
            ImapCrateCapability::Atom(token) => line.push_str(token),
        }
    }
    CapabilitySet::parse(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xoauth2_response_matches_rfc_format() {
        let mut auth = XOAuth2 {
            user: "jane@example.com".to_string(),
            token: "ya29.abc".to_string(),
        };
        let resp = auth.process(b"");
        assert_eq!(resp, "user=jane@example.com\x01auth=Bearer ya29.abc\x01\x01");
    }
}
