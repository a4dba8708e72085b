//! Compose/send pipeline: turning a composed [`crate::mime::Email`] into
//! delivered mail plus any configured Fcc (file-carbon-copy) archiving.

pub mod send;

pub use send::{parse_fcc_targets, SendOutcome};
