//! Send pipeline: serializes the composed message, hands it to whichever
//! transport the account uses (IMAP `APPEND`-based submission is out of
//! scope — actual SMTP delivery is a host concern per spec §1 — but Fcc
//! archiving into an IMAP mailbox after a successful send is this crate's
//! job), and files copies per the `Fcc` header.
//!
//! `Fcc` resolution (`SPEC_FULL.md` §4.8 supplement): `original_source/`'s
//! `mutt_write_multiple_fcc` and `mutt_write_fcc` disagree on how a
//! comma-separated `Fcc` value is split when one token is empty. We resolve
//! that here, once, for every caller: split on `,`, trim whitespace, and
//! silently skip empty tokens — no error, no write for that token.

use crate::error::MailCoreResult;
use crate::imap::client::ImapClient;
use crate::mime::writer::write_message;
use crate::mime::Email;

/// Splits a raw `Fcc` header value into the mailbox names to file copies
/// into, applying the comma-split/trim/skip-empty rule uniformly.
pub fn parse_fcc_targets(fcc_value: &str) -> Vec<String> {
    fcc_value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub filed_into: Vec<String>,
    pub skipped: Vec<String>,
}

/// Files `article`'s serialized bytes into every resolved Fcc target via
/// IMAP `APPEND`. A target that fails to append is recorded in `skipped`
/// rather than aborting the remaining targets — one unreachable Fcc
/// mailbox shouldn't stop archiving into the others.
pub async fn file_fcc_copies(
    client: &mut ImapClient,
    article: &Email,
    fcc_value: &str,
    max_multipart_depth: usize,
) -> MailCoreResult<SendOutcome> {
    let targets = parse_fcc_targets(fcc_value);
    let raw = write_message(article, max_multipart_depth)?;

    let mut outcome = SendOutcome {
        filed_into: Vec::new(),
        skipped: Vec::new(),
    };
    for target in targets {
        match client.append(&target, &raw).await {
            Ok(()) => outcome.filed_into.push(target),
            Err(_) => outcome.skipped.push(target),
        }
    }
    Ok(outcome)
}

impl ImapClient {
    /// `APPEND mailbox {size}` followed by the literal bytes — the
    /// mechanism Fcc archiving and any "save draft" flow both use.
    pub async fn append(&mut self, mailbox: &str, raw_message: &[u8]) -> MailCoreResult<()> {
        self.machine.require_authenticated()?;
        let encoded = utf7_imap::encode_utf7_imap(mailbox.to_string());
        self.session
            .append(&encoded, raw_message)
            .await
            .map_err(|e| crate::raise_error!(format!("APPEND {mailbox} failed: {e}"), crate::error::ErrorKind::ProtocolBad))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_and_trims_whitespace() {
        let targets = parse_fcc_targets("INBOX.Sent, Archive , Drafts");
        assert_eq!(
            targets,
            vec!["INBOX.Sent".to_string(), "Archive".to_string(), "Drafts".to_string()]
        );
    }

    #[test]
    fn skips_empty_tokens_silently() {
        let targets = parse_fcc_targets("INBOX.Sent,,  ,Archive");
        assert_eq!(targets, vec!["INBOX.Sent".to_string(), "Archive".to_string()]);
    }

    #[test]
    fn single_target_with_no_comma() {
        let targets = parse_fcc_targets("INBOX.Sent");
        assert_eq!(targets, vec!["INBOX.Sent".to_string()]);
    }

    #[test]
    fn all_empty_yields_no_targets() {
        let targets = parse_fcc_targets(" , , ");
        assert!(targets.is_empty());
    }
}
