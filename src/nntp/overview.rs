//! OVER/XOVER (RFC 3977 §8.3): tab-separated per-article summary lines,
//! fetched by article-number range and parsed into structured records
//! instead of leaving callers to split tabs themselves.

use crate::error::{ErrorKind, MailCoreResult};
use crate::nntp::connection::NntpClient;
use crate::raise_error;
use crate::sync::batcher::{batch_into_ranges, ranges_to_wire};

/// One row of the overview database for an article, per the seven
/// mandatory fields of RFC 3977 §8.3 (`Xref` and further fields omitted
/// here since no operation in this crate consumes them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewRow {
    pub number: u32,
    pub subject: String,
    pub from: String,
    pub date: String,
    pub message_id: String,
    pub references: Vec<String>,
    pub bytes: u64,
    pub lines: u64,
}

fn parse_row(line: &str) -> Option<OverviewRow> {
    let mut fields = line.split('\t');
    let number = fields.next()?.parse().ok()?;
    let subject = fields.next()?.to_string();
    let from = fields.next()?.to_string();
    let date = fields.next()?.to_string();
    let message_id = fields.next()?.to_string();
    let references = fields
        .next()
        .unwrap_or("")
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();
    let bytes = fields.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let lines = fields.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    Some(OverviewRow {
        number,
        subject,
        from,
        date,
        message_id,
        references,
        bytes,
        lines,
    })
}

impl NntpClient {
    /// Fetches overview rows for `numbers` in the currently selected group,
    /// batched into the fewest `OVER`/`XOVER` ranges (`OVER` per RFC 3977,
    /// falling back to the historical `XOVER` for servers that only
    /// advertise it).
    pub async fn overview(&mut self, numbers: &[u32]) -> MailCoreResult<Vec<OverviewRow>> {
        self.require_group()?;
        self.cancel.poll_cancellation()?;
        if numbers.is_empty() {
            return Ok(Vec::new());
        }
        let command_name = if self.capabilities.has("OVER") { "OVER" } else { "XOVER" };
        let ranges = batch_into_ranges(numbers);
        let set = ranges_to_wire(&ranges);

        let body = self
            .command_multiline(&format!("{command_name} {set}"))
            .await
            .map_err(|e| raise_error!(format!("{command_name} failed: {e}"), ErrorKind::ProtocolBad))?;

        Ok(body.lines().filter_map(parse_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_overview_line() {
        let line = "42\tHello world\tjane@example.com\tMon, 1 Jan 2026 00:00:00 +0000\t<abc@x>\t<root@x> <parent@x>\t1234\t42";
        let row = parse_row(line).unwrap();
        assert_eq!(row.number, 42);
        assert_eq!(row.subject, "Hello world");
        assert_eq!(row.references, vec!["<root@x>".to_string(), "<parent@x>".to_string()]);
        assert_eq!(row.bytes, 1234);
        assert_eq!(row.lines, 42);
    }

    #[test]
    fn missing_optional_fields_default_to_zero() {
        let line = "1\tsubj\tfrom\tdate\t<id@x>";
        let row = parse_row(line).unwrap();
        assert_eq!(row.bytes, 0);
        assert_eq!(row.lines, 0);
        assert!(row.references.is_empty());
    }

    #[test]
    fn malformed_line_without_number_is_skipped() {
        assert!(parse_row("not-a-number\tsubj").is_none());
    }
}
