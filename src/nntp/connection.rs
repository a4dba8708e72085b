//! Wire-level NNTP I/O: line-oriented commands and responses over the same
//! `MailStream` transport the IMAP client uses, since RFC 3977 is a plain
//! CRLF text protocol with no framing library needed — a `BufReader`
//! plus a multi-line-response reader covers it, the same shape as the host
//! application's raw line-protocol helpers in `utils::net`.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{ErrorKind, MailCoreResult};
use crate::mailbox::account::AccountConfig;
use crate::mailbox::connection::{self, MailStream};
use crate::nntp::capability::CapabilitySet;
use crate::nntp::state::{NntpMachine, NntpState};
use crate::primitives::strutil::dot_unstuff;
use crate::raise_error;
use crate::signal::CancelToken;

pub struct NntpClient {
    pub(crate) reader: BufReader<tokio::io::ReadHalf<MailStream>>,
    pub(crate) writer: tokio::io::WriteHalf<MailStream>,
    pub(crate) machine: NntpMachine,
    pub(crate) capabilities: CapabilitySet,
    pub(crate) cancel: CancelToken,
}

/// A parsed single-line NNTP response: the three-digit status code and the
/// rest of the line as free text.
#[derive(Debug, Clone)]
pub struct Response {
    pub code: u16,
    pub text: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.code)
    }

    /// True for codes that introduce a multi-line block terminated by a
    /// lone `.` (RFC 3977 §3.1.1): ARTICLE/HEAD/BODY/LIST/etc responses.
    pub fn expects_multiline(&self) -> bool {
        matches!(self.code, 100 | 101 | 215 | 220 | 221 | 222 | 224 | 225 | 230 | 231)
    }
}

impl NntpClient {
    pub async fn connect(account: &AccountConfig, cancel: CancelToken) -> MailCoreResult<Self> {
        let mut machine = NntpMachine::new();
        let stream = connection::connect(account).await?;
        machine.transition(NntpState::Connected)?;
        let (read_half, write_half) = tokio::io::split(stream);

        let mut client = Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            machine,
            capabilities: CapabilitySet::default(),
            cancel,
        };

        let greeting = client.read_response().await?;
        if !greeting.is_success() {
            return Err(raise_error!(
                format!("server rejected connection: {} {}", greeting.code, greeting.text),
                ErrorKind::ProtocolNo
            ));
        }

        let caps_lines = client.command_multiline("CAPABILITIES").await?;
        client.capabilities = CapabilitySet::parse(&caps_lines);
        Ok(client)
    }

    /// Sends a single command line, appending the mandatory CRLF.
    pub async fn write_command(&mut self, command: &str) -> MailCoreResult<()> {
        self.cancel.poll_cancellation()?;
        self.writer
            .write_all(command.as_bytes())
            .await
            .map_err(|e| raise_error!(format!("failed writing command: {e}"), ErrorKind::Io))?;
        self.writer
            .write_all(b"\r\n")
            .await
            .map_err(|e| raise_error!(format!("failed writing command terminator: {e}"), ErrorKind::Io))?;
        self.writer
            .flush()
            .await
            .map_err(|e| raise_error!(format!("failed flushing command: {e}"), ErrorKind::Io))
    }

    /// Reads a single status line and parses its response code.
    pub async fn read_response(&mut self) -> MailCoreResult<Response> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| raise_error!(format!("failed reading response: {e}"), ErrorKind::Io))?;
        if n == 0 {
            return Err(raise_error!("server closed connection".to_string(), ErrorKind::Io));
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let (code_str, text) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let code = code_str
            .parse::<u16>()
            .map_err(|_| raise_error!(format!("malformed response line: {trimmed}"), ErrorKind::Parse))?;
        Ok(Response {
            code,
            text: text.to_string(),
        })
    }

    /// Reads the dot-terminated block following a multi-line response code,
    /// unstuffing escaped leading dots.
    pub async fn read_multiline_body(&mut self) -> MailCoreResult<String> {
        let mut body = String::new();
        loop {
            let mut line = String::new();
            let n = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|e| raise_error!(format!("failed reading multiline body: {e}"), ErrorKind::Io))?;
            if n == 0 {
                return Err(raise_error!("connection closed mid multiline response".to_string(), ErrorKind::Io));
            }
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed == "." {
                break;
            }
            body.push_str(trimmed);
            body.push_str("\r\n");
        }
        Ok(dot_unstuff(&body))
    }

    /// Issues `command`, expects a success code that introduces a
    /// multi-line block, and returns the unstuffed body text.
    pub async fn command_multiline(&mut self, command: &str) -> MailCoreResult<String> {
        self.write_command(command).await?;
        let response = self.read_response().await?;
        if !response.is_success() {
            return Err(raise_error!(
                format!("{command} rejected: {} {}", response.code, response.text),
                ErrorKind::ProtocolNo
            ));
        }
        self.read_multiline_body().await
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn state(&self) -> NntpState {
        self.machine.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_success_range_matches_rfc3977() {
        assert!(Response { code: 200, text: String::new() }.is_success());
        assert!(Response { code: 381, text: String::new() }.is_success());
        assert!(!Response { code: 500, text: String::new() }.is_success());
    }

    #[test]
    fn multiline_codes_recognized() {
        assert!(Response { code: 220, text: String::new() }.expects_multiline());
        assert!(!Response { code: 200, text: String::new() }.expects_multiline());
    }
}
