//! Core of a text-mode mail client: MIME/RFC 822 engine, IMAP and NNTP
//! session state machines, and the mailbox-sync machinery shared by both.
//!
//! Terminal UI, configuration parsing, editor/mailcap invocation, crypto
//! primitives and address-book lookups live outside this crate; see
//! [`crypto::CryptoBackend`] and [`mailbox::mxops::MxOps`] for the seams.

pub mod cache;
pub mod compose;
pub mod config;
pub mod crypto;
pub mod error;
pub mod imap;
pub mod logging;
pub mod mailbox;
pub mod mime;
pub mod nntp;
pub mod primitives;
pub mod signal;
pub mod sync;

pub use error::{ErrorKind, MailCoreError, MailCoreResult};
