//! Header/envelope cache over `redb`: avoids re-fetching and re-parsing a
//! message's headers on every mailbox open. Keyed by `"account/mailbox/uid"`
//! for IMAP or `"group/number"` for NNTP — either way the part before the
//! last `/` is what [`HeaderCache::clear_group`] treats as the group/mailbox
//! prefix to invalidate.
//!
//! Each entry carries a schema version tag (`SPEC_FULL.md` §4.6 supplement):
//! a crate upgrade that changes `Envelope`'s serialized shape bumps
//! `SCHEMA_VERSION`, and old entries whose tag doesn't match are treated as
//! a cache miss rather than a deserialization panic — the same reasoning
//! `original_source/`'s hcache applies per build.

use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, MailCoreResult};
use crate::imap::fetch::MessageFlags;
use crate::mime::envelope::Envelope;
use crate::raise_error;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("headers");
const SCHEMA_VERSION: u32 = 1;

/// Key suffix for the per-group high-water mark entry, kept in the same
/// table as the headers it governs rather than a second table.
const GROUP_HIGH_SUFFIX: &str = "__group_high__";

fn group_high_key(group: &str) -> String {
    format!("{group}/{GROUP_HIGH_SUFFIX}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEntry {
    schema_version: u32,
    envelope: Envelope,
    flags: MessageFlags,
}

pub struct HeaderCache {
    db: Database,
}

impl HeaderCache {
    pub fn open(path: &std::path::Path) -> MailCoreResult<Self> {
        let db = Database::create(path)
            .map_err(|e| raise_error!(format!("failed opening header cache: {e}"), ErrorKind::Io))?;
        let write_txn = db
            .begin_write()
            .map_err(|e| raise_error!(format!("failed starting cache init transaction: {e}"), ErrorKind::Io))?;
        {
            write_txn
                .open_table(TABLE)
                .map_err(|e| raise_error!(format!("failed creating header table: {e}"), ErrorKind::Io))?;
        }
        write_txn
            .commit()
            .map_err(|e| raise_error!(format!("failed committing cache init: {e}"), ErrorKind::Io))?;
        Ok(Self { db })
    }

    pub fn put(&self, key: &str, envelope: &Envelope, flags: &MessageFlags) -> MailCoreResult<()> {
        let entry = CachedEntry {
            schema_version: SCHEMA_VERSION,
            envelope: envelope.clone(),
            flags: flags.clone(),
        };
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| raise_error!(format!("failed encoding cache entry: {e}"), ErrorKind::Parse))?;
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| raise_error!(format!("failed starting write transaction: {e}"), ErrorKind::Io))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| raise_error!(format!("failed opening header table: {e}"), ErrorKind::Io))?;
            table
                .insert(key, bytes.as_slice())
                .map_err(|e| raise_error!(format!("failed inserting cache entry: {e}"), ErrorKind::Io))?;
        }
        write_txn
            .commit()
            .map_err(|e| raise_error!(format!("failed committing cache entry: {e}"), ErrorKind::Io))
    }

    /// Returns `None` both for a true cache miss and for a stale-schema hit
    /// — to the caller both mean "go fetch it again".
    pub fn get(&self, key: &str) -> MailCoreResult<Option<(Envelope, MessageFlags)>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| raise_error!(format!("failed starting read transaction: {e}"), ErrorKind::Io))?;
        let table = match read_txn.open_table(TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(raise_error!(format!("failed opening header table: {e}"), ErrorKind::Io)),
        };
        let Some(value) = table
            .get(key)
            .map_err(|e| raise_error!(format!("failed reading cache entry: {e}"), ErrorKind::Io))?
        else {
            return Ok(None);
        };
        let entry: CachedEntry = match serde_json::from_slice(value.value()) {
            Ok(entry) => entry,
            Err(_) => return Ok(None),
        };
        if entry.schema_version != SCHEMA_VERSION {
            return Ok(None);
        }
        Ok(Some((entry.envelope, entry.flags)))
    }

    pub fn remove(&self, key: &str) -> MailCoreResult<()> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| raise_error!(format!("failed starting write transaction: {e}"), ErrorKind::Io))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| raise_error!(format!("failed opening header table: {e}"), ErrorKind::Io))?;
            table
                .remove(key)
                .map_err(|e| raise_error!(format!("failed removing cache entry: {e}"), ErrorKind::Io))?;
        }
        write_txn
            .commit()
            .map_err(|e| raise_error!(format!("failed committing removal: {e}"), ErrorKind::Io))
    }

    /// Removes every entry keyed under `"{group}/..."`, including the
    /// group's own high-water mark — a full reset, for when the group's
    /// article numbering can no longer be trusted to mean what it used to.
    pub fn clear_group(&self, group: &str) -> MailCoreResult<()> {
        let prefix = format!("{group}/");
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| raise_error!(format!("failed starting write transaction: {e}"), ErrorKind::Io))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| raise_error!(format!("failed opening header table: {e}"), ErrorKind::Io))?;
            let stale_keys: Vec<String> = table
                .iter()
                .map_err(|e| raise_error!(format!("failed scanning header table: {e}"), ErrorKind::Io))?
                .filter_map(|entry| entry.ok())
                .map(|(k, _)| k.value().to_string())
                .filter(|k| k.starts_with(&prefix))
                .collect();
            for key in &stale_keys {
                table
                    .remove(key.as_str())
                    .map_err(|e| raise_error!(format!("failed removing cache entry: {e}"), ErrorKind::Io))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| raise_error!(format!("failed committing group clear: {e}"), ErrorKind::Io))
    }

    /// Compares `new_high` against the high-water mark recorded for `group`
    /// the last time it was selected, updates the stored mark to
    /// `new_high`, and reports whether the group shrank (`new_high` below
    /// the previous mark). No prior mark (first time this group is seen) is
    /// never a shrink. On shrink, every cached header for the group is
    /// discarded before the new mark is recorded, since an article number
    /// that used to point at one message may now point at a different one.
    pub fn sync_group_high_water(&self, group: &str, new_high: u32) -> MailCoreResult<bool> {
        let key = group_high_key(group);
        let previous = self
            .get_raw(&key)?
            .and_then(|bytes| std::str::from_utf8(&bytes).ok().and_then(|s| s.parse::<u32>().ok()));

        let shrank = matches!(previous, Some(prev) if new_high < prev);
        if shrank {
            self.clear_group(group)?;
        }

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| raise_error!(format!("failed starting write transaction: {e}"), ErrorKind::Io))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| raise_error!(format!("failed opening header table: {e}"), ErrorKind::Io))?;
            table
                .insert(key.as_str(), new_high.to_string().into_bytes().as_slice())
                .map_err(|e| raise_error!(format!("failed recording group high-water mark: {e}"), ErrorKind::Io))?;
        }
        write_txn
            .commit()
            .map_err(|e| raise_error!(format!("failed committing group high-water mark: {e}"), ErrorKind::Io))?;
        Ok(shrank)
    }

    fn get_raw(&self, key: &str) -> MailCoreResult<Option<Vec<u8>>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| raise_error!(format!("failed starting read transaction: {e}"), ErrorKind::Io))?;
        let table = match read_txn.open_table(TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(raise_error!(format!("failed opening header table: {e}"), ErrorKind::Io)),
        };
        let Some(value) = table
            .get(key)
            .map_err(|e| raise_error!(format!("failed reading cache entry: {e}"), ErrorKind::Io))?
        else {
            return Ok(None);
        };
        Ok(Some(value.value().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        let mut envelope = Envelope::new();
        envelope.subject = Some("hi".to_string());
        let flags = MessageFlags::default();
        cache.put("acct/INBOX/1", &envelope, &flags).unwrap();
        let (loaded_envelope, _) = cache.get("acct/INBOX/1").unwrap().unwrap();
        assert_eq!(loaded_envelope.subject.as_deref(), Some("hi"));
    }

    #[test]
    fn get_missing_key_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        assert!(cache.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn stale_schema_version_treated_as_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        let stale = CachedEntry {
            schema_version: SCHEMA_VERSION + 1,
            envelope: Envelope::new(),
            flags: MessageFlags::default(),
        };
        let bytes = serde_json::to_vec(&stale).unwrap();
        let write_txn = cache.db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(TABLE).unwrap();
            table.insert("k", bytes.as_slice()).unwrap();
        }
        write_txn.commit().unwrap();
        assert!(cache.get("k").unwrap().is_none());
    }

    #[test]
    fn remove_clears_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        cache.put("k", &Envelope::new(), &MessageFlags::default()).unwrap();
        cache.remove("k").unwrap();
        assert!(cache.get("k").unwrap().is_none());
    }

    #[test]
    fn clear_group_removes_only_that_groups_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        cache
            .put("comp.lang.rust/1", &Envelope::new(), &MessageFlags::default())
            .unwrap();
        cache
            .put("comp.lang.c/1", &Envelope::new(), &MessageFlags::default())
            .unwrap();
        cache.clear_group("comp.lang.rust").unwrap();
        assert!(cache.get("comp.lang.rust/1").unwrap().is_none());
        assert!(cache.get("comp.lang.c/1").unwrap().is_some());
    }

    #[test]
    fn first_sighting_of_a_group_is_never_a_shrink() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        assert!(!cache.sync_group_high_water("comp.lang.rust", 5000).unwrap());
    }

    #[test]
    fn rising_high_is_not_a_shrink_and_keeps_cached_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        cache
            .put("comp.lang.rust/1", &Envelope::new(), &MessageFlags::default())
            .unwrap();
        cache.sync_group_high_water("comp.lang.rust", 100).unwrap();
        let shrank = cache.sync_group_high_water("comp.lang.rust", 200).unwrap();
        assert!(!shrank);
        assert!(cache.get("comp.lang.rust/1").unwrap().is_some());
    }

    #[test]
    fn shrinking_high_clears_group_headers() {
        let dir = tempfile::tempdir().unwrap();
        let cache = HeaderCache::open(&dir.path().join("headers.redb")).unwrap();
        cache
            .put("comp.lang.rust/50", &Envelope::new(), &MessageFlags::default())
            .unwrap();
        cache.sync_group_high_water("comp.lang.rust", 100).unwrap();
        let shrank = cache.sync_group_high_water("comp.lang.rust", 40).unwrap();
        assert!(shrank);
        assert!(cache.get("comp.lang.rust/50").unwrap().is_none());
    }
}
