//! Per-account connection settings: enough to open a socket and
//! authenticate, independent of which protocol the account uses.

use crate::mailbox::mxops::MailboxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain TCP, no TLS (rare; some local NNTP relays).
    None,
    /// TLS from the first byte (IMAPS 993, NNTPS 563).
    Implicit,
    /// Plain TCP, then `STARTTLS`/`STLS` before authenticating.
    StartTls,
}

#[derive(Debug, Clone)]
pub enum Credentials {
    Plain { user: String, password: String },
    /// An already-obtained OAuth2 bearer token (XOAUTH2/OAUTHBEARER); this
    /// crate never performs the OAuth2 flow itself.
    OAuthBearer { user: String, token: String },
    /// NNTP reading a public group with no `AUTHINFO` exchange.
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub kind: MailboxKind,
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
    pub credentials: Credentials,
    /// SOCKS5 proxy to dial through instead of connecting directly.
    pub socks_proxy: Option<String>,
}

impl AccountConfig {
    pub fn imaps(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            kind: MailboxKind::Imap,
            host: host.into(),
            port: 993,
            tls: TlsMode::Implicit,
            credentials,
            socks_proxy: None,
        }
    }

    pub fn nntps(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            kind: MailboxKind::Nntp,
            host: host.into(),
            port: 563,
            tls: TlsMode::Implicit,
            credentials,
            socks_proxy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imaps_defaults_to_implicit_tls_on_993() {
        let account = AccountConfig::imaps("mail.example.com", Credentials::Anonymous);
        assert_eq!(account.port, 993);
        assert_eq!(account.tls, TlsMode::Implicit);
        assert_eq!(account.kind, MailboxKind::Imap);
    }

    #[test]
    fn nntps_defaults_to_563() {
        let account = AccountConfig::nntps("news.example.com", Credentials::Anonymous);
        assert_eq!(account.port, 563);
        assert_eq!(account.kind, MailboxKind::Nntp);
    }
}
