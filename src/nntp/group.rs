//! GROUP / LISTGROUP (RFC 3977 §6.1): selecting a newsgroup and learning
//! its article-number range.
//!
//! A news spool can be reset (expired and recreated) between sessions, in
//! which case its article numbering restarts from a lower `high` than what
//! this crate last saw. When that happens, article numbers this crate has
//! cached no longer mean what they used to, so the cached headers and
//! overview rows for that group must be thrown away rather than trusted.
//! [`sync_group_high_water`] does that check and invalidation; callers run
//! it right after [`NntpClient::group`] or [`NntpClient::listgroup`].

use crate::cache::group_cache::GroupOverviewCache;
use crate::cache::header_cache::HeaderCache;
use crate::error::{ErrorKind, MailCoreResult};
use crate::nntp::connection::NntpClient;
use crate::raise_error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub name: String,
    pub count: u64,
    pub low: u32,
    pub high: u32,
}

impl NntpClient {
    /// `GROUP name` — selects the group and returns its current stats.
    /// Callers that keep a header/overview cache should follow this with
    /// [`sync_group_high_water`] to catch a reset spool before trusting any
    /// cached article data for the group.
    pub async fn group(&mut self, name: &str) -> MailCoreResult<GroupInfo> {
        self.write_command(&format!("GROUP {name}")).await?;
        let response = self.read_response().await?;
        if response.code != 211 {
            return Err(raise_error!(
                format!("GROUP {name} failed: {} {}", response.code, response.text),
                ErrorKind::ProtocolNo
            ));
        }
        let info = parse_211(&response.text, name)?;
        self.machine.select_group(name)?;
        Ok(info)
    }

    /// `LISTGROUP name` — like `GROUP`, but also returns every article
    /// number in the group (unbounded; callers should prefer `OVER` ranges
    /// for large groups).
    pub async fn listgroup(&mut self, name: &str) -> MailCoreResult<(GroupInfo, Vec<u32>)> {
        self.write_command(&format!("LISTGROUP {name}")).await?;
        let response = self.read_response().await?;
        if response.code != 211 {
            return Err(raise_error!(
                format!("LISTGROUP {name} failed: {} {}", response.code, response.text),
                ErrorKind::ProtocolNo
            ));
        }
        let info = parse_211(&response.text, name)?;
        let body = self.read_multiline_body().await?;
        let numbers = body
            .lines()
            .filter_map(|l| l.trim().parse::<u32>().ok())
            .collect();
        self.machine.select_group(name)?;
        Ok((info, numbers))
    }

    pub fn current_group(&self) -> Option<&str> {
        self.machine.current_group()
    }

    pub fn require_group(&self) -> MailCoreResult<()> {
        self.machine.require_group_selected()
    }
}

/// Compares `info.high` against the high-water mark recorded for this
/// group the last time it was selected, clearing `header_cache`'s and
/// `group_cache`'s entries for the group if it shrank. Returns whether an
/// invalidation happened, so the caller can log it or trigger a re-sync.
pub fn sync_group_high_water(
    header_cache: &HeaderCache,
    group_cache: &mut GroupOverviewCache,
    info: &GroupInfo,
) -> MailCoreResult<bool> {
    let shrank = header_cache.sync_group_high_water(&info.name, info.high)?;
    if shrank {
        group_cache.clear_group(&info.name);
    }
    Ok(shrank)
}

fn parse_211(text: &str, fallback_name: &str) -> MailCoreResult<GroupInfo> {
    let mut parts = text.split_whitespace();
    let count = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let low = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let high = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let name = parts.next().unwrap_or(fallback_name).to_string();
    Ok(GroupInfo { name, count, low, high })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_211_extracts_all_fields() {
        let info = parse_211("5000 1 5000 comp.lang.rust", "fallback").unwrap();
        assert_eq!(info.name, "comp.lang.rust");
        assert_eq!(info.count, 5000);
        assert_eq!(info.low, 1);
        assert_eq!(info.high, 5000);
    }

    #[test]
    fn parse_211_falls_back_to_requested_name() {
        let info = parse_211("0 0 0", "comp.lang.rust").unwrap();
        assert_eq!(info.name, "comp.lang.rust");
    }

    #[test]
    fn shrinking_group_invalidates_both_caches() {
        let dir = tempfile::tempdir().unwrap();
        let header_cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        let mut group_cache = GroupOverviewCache::new(10);

        let first = GroupInfo {
            name: "comp.lang.rust".to_string(),
            count: 100,
            low: 1,
            high: 100,
        };
        header_cache
            .put("comp.lang.rust/50", &crate::mime::envelope::Envelope::new(), &Default::default())
            .unwrap();
        group_cache.insert(
            "comp.lang.rust",
            crate::nntp::overview::OverviewRow {
                number: 50,
                subject: "s".to_string(),
                from: "f".to_string(),
                date: "d".to_string(),
                message_id: "<50@x>".to_string(),
                references: Vec::new(),
                bytes: 0,
                lines: 0,
            },
        );
        assert!(!sync_group_high_water(&header_cache, &mut group_cache, &first).unwrap());

        let reset = GroupInfo {
            name: "comp.lang.rust".to_string(),
            count: 10,
            low: 1,
            high: 10,
        };
        let shrank = sync_group_high_water(&header_cache, &mut group_cache, &reset).unwrap();
        assert!(shrank);
        assert!(header_cache.get("comp.lang.rust/50").unwrap().is_none());
        assert_eq!(group_cache.len("comp.lang.rust"), 0);
    }

    #[test]
    fn growing_group_does_not_invalidate() {
        let dir = tempfile::tempdir().unwrap();
        let header_cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        let mut group_cache = GroupOverviewCache::new(10);

        let first = GroupInfo {
            name: "comp.lang.rust".to_string(),
            count: 100,
            low: 1,
            high: 100,
        };
        sync_group_high_water(&header_cache, &mut group_cache, &first).unwrap();

        let grown = GroupInfo {
            name: "comp.lang.rust".to_string(),
            count: 200,
            low: 1,
            high: 200,
        };
        assert!(!sync_group_high_water(&header_cache, &mut group_cache, &grown).unwrap());
    }
}
