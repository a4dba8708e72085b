//! Content-addressed body cache over `cacache`, adapted from the host
//! application's `cache::disk::DiskCache`: `put` commits atomically on
//! writer close, `get` returns an open readable stream rather than a
//! buffered `Vec<u8>` so large message bodies never need to be fully
//! resident just to be cached or served.

use cacache::{Reader, Writer};
use tokio::io::AsyncWriteExt;

use crate::error::{ErrorKind, MailCoreResult};
use crate::raise_error;

pub struct BodyCache {
    cache_dir: std::path::PathBuf,
}

impl BodyCache {
    pub fn new(cache_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Writes `data` under `key`, committing atomically — a reader opened
    /// on `key` before this call completes never observes a partial write.
    pub async fn put(&self, key: &str, data: &[u8]) -> MailCoreResult<()> {
        let mut writer = Writer::create(&self.cache_dir, key)
            .await
            .map_err(|e| raise_error!(format!("failed opening cache writer: {e}"), ErrorKind::Io))?;
        writer
            .write_all(data)
            .await
            .map_err(|e| raise_error!(format!("failed writing cache entry: {e}"), ErrorKind::Io))?;
        writer
            .commit()
            .await
            .map_err(|e| raise_error!(format!("failed committing cache entry: {e}"), ErrorKind::Io))?;
        Ok(())
    }

    /// Opens `key` for streaming read, or `None` if it isn't cached.
    pub async fn get(&self, key: &str) -> MailCoreResult<Option<Reader>> {
        match Reader::open(&self.cache_dir, key).await {
            Ok(reader) => Ok(Some(reader)),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(raise_error!(format!("failed opening cache reader: {e}"), ErrorKind::Io)),
        }
    }

    pub async fn remove(&self, key: &str) -> MailCoreResult<()> {
        cacache::remove(&self.cache_dir, key)
            .await
            .map_err(|e| raise_error!(format!("failed removing cache entry: {e}"), ErrorKind::Io))
    }

    pub async fn clear(&self) -> MailCoreResult<()> {
        cacache::clear(&self.cache_dir)
            .await
            .map_err(|e| raise_error!(format!("failed clearing cache: {e}"), ErrorKind::Io))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn put_then_get_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BodyCache::new(dir.path());
        cache.put("key1", b"hello world").await.unwrap();
        let mut reader = cache.get("key1").await.unwrap().unwrap();
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, b"hello world");
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BodyCache::new(dir.path());
        assert!(cache.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_makes_entry_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BodyCache::new(dir.path());
        cache.put("key1", b"data").await.unwrap();
        cache.remove("key1").await.unwrap();
        assert!(cache.get("key1").await.unwrap().is_none());
    }
}
