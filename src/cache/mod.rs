//! Local caches: a `redb`-backed header cache (parsed envelopes/flags,
//! avoiding a re-fetch+re-parse on every mailbox open), a `cacache`-backed
//! body cache (full message bytes, content-addressed), and an in-memory
//! NNTP overview cache bounded by `ConfigView::nntp_acache_len`.

pub mod body_cache;
pub mod group_cache;
pub mod header_cache;

pub use body_cache::BodyCache;
pub use group_cache::GroupOverviewCache;
pub use header_cache::HeaderCache;
