//! ARTICLE/HEAD/BODY/STAT (RFC 3977 §6.2): retrieving article content by
//! number or Message-ID.

use crate::config::ConfigView;
use crate::error::{ErrorKind, MailCoreResult};
use crate::mime::parser::parse_message;
use crate::mime::Email;
use crate::nntp::connection::NntpClient;
use crate::raise_error;

/// Identifies an article either by its number in the selected group or by
/// its globally unique Message-ID (RFC 3977 §3.6), which works without a
/// group selected.
#[derive(Debug, Clone)]
pub enum ArticleRef {
    Number(u32),
    MessageId(String),
}

impl ArticleRef {
    fn wire_token(&self) -> String {
        match self {
            ArticleRef::Number(n) => n.to_string(),
            ArticleRef::MessageId(id) => id.clone(),
        }
    }
}

impl NntpClient {
    /// `ARTICLE` — full headers and body, parsed into an [`Email`].
    pub async fn article(&mut self, reference: &ArticleRef, config: &ConfigView) -> MailCoreResult<Email> {
        if matches!(reference, ArticleRef::Number(_)) {
            self.require_group()?;
        }
        let body = self
            .command_multiline(&format!("ARTICLE {}", reference.wire_token()))
            .await?;
        parse_message(body.as_bytes(), config)
    }

    /// `HEAD` — headers only, still parsed into an [`Email`] whose body
    /// tree has no content (no leaf bytes were ever sent).
    pub async fn head(&mut self, reference: &ArticleRef, config: &ConfigView) -> MailCoreResult<Email> {
        if matches!(reference, ArticleRef::Number(_)) {
            self.require_group()?;
        }
        let body = self
            .command_multiline(&format!("HEAD {}", reference.wire_token()))
            .await?;
        let mut message = body.into_bytes();
        message.extend_from_slice(b"\r\n");
        parse_message(&message, config)
    }

    /// `BODY` — raw article body text, dot-unstuffed already by
    /// `command_multiline`.
    pub async fn body(&mut self, reference: &ArticleRef) -> MailCoreResult<String> {
        if matches!(reference, ArticleRef::Number(_)) {
            self.require_group()?;
        }
        self.command_multiline(&format!("BODY {}", reference.wire_token())).await
    }

    /// `STAT` — confirms the article exists and (for a number reference)
    /// advances the group's "current article" pointer, without transferring
    /// any content.
    pub async fn stat(&mut self, reference: &ArticleRef) -> MailCoreResult<u32> {
        if matches!(reference, ArticleRef::Number(_)) {
            self.require_group()?;
        }
        self.write_command(&format!("STAT {}", reference.wire_token())).await?;
        let response = self.read_response().await?;
        if response.code != 223 {
            return Err(raise_error!(
                format!("STAT failed: {} {}", response.code, response.text),
                ErrorKind::ProtocolNo
            ));
        }
        response
            .text
            .split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| raise_error!("STAT response missing article number".to_string(), ErrorKind::Parse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_token_formats_number_reference() {
        assert_eq!(ArticleRef::Number(42).wire_token(), "42");
    }

    #[test]
    fn wire_token_passes_message_id_through() {
        assert_eq!(
            ArticleRef::MessageId("<abc@example.com>".to_string()).wire_token(),
            "<abc@example.com>"
        );
    }
}
