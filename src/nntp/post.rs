//! POST (RFC 3977 §6.3.1): submitting a composed article. Reuses the MIME
//! writer to serialize the message, then dot-stuffs it for wire transport —
//! grounded in `original_source/nntp.c`'s use of the generic message-copy
//! routine ahead of issuing `POST`, rather than reimplementing message
//! serialization at the posting layer.

use crate::error::{ErrorKind, MailCoreResult};
use crate::mime::writer::write_message;
use crate::mime::Email;
use crate::nntp::connection::NntpClient;
use crate::primitives::strutil::dot_stuff;
use crate::raise_error;

impl NntpClient {
    /// Posts `article`, failing fast if the server never advertised `POST`
    /// rather than letting the server reject it after the body is sent.
    pub async fn post(&mut self, article: &Email, max_multipart_depth: usize) -> MailCoreResult<()> {
        if !self.capabilities.supports_posting() {
            return Err(raise_error!(
                "server does not accept posts (no POST capability)".to_string(),
                ErrorKind::ProtocolNo
            ));
        }

        self.write_command("POST").await?;
        let response = self.read_response().await?;
        if response.code != 340 {
            return Err(raise_error!(
                format!("server refused to accept a post: {} {}", response.code, response.text),
                ErrorKind::ProtocolNo
            ));
        }

        let raw = write_message(article, max_multipart_depth)?;
        let text = String::from_utf8_lossy(&raw);
        let stuffed = dot_stuff(&text);
        self.write_command(&stuffed).await?;
        self.write_command(".").await?;

        let final_response = self.read_response().await?;
        if final_response.code != 240 {
            return Err(raise_error!(
                format!("post rejected: {} {}", final_response.code, final_response.text),
                ErrorKind::ProtocolNo
            ));
        }
        Ok(())
    }
}
