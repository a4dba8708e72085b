//! Mailbox synchronization primitives shared between IMAP and NNTP: the
//! message-set/UID-range batcher (spec §4.7) that turns a scattered set of
//! identifiers into the fewest wire-efficient ranges.

pub mod batcher;

pub use batcher::{batch_into_ranges, IdRange};
