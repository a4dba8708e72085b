//! IMAP4rev1 (RFC 3501) client: connection/session state machine built on
//! top of `async-imap`'s wire codec, mailbox selection and management,
//! fetch, flag sync, copy, and IDLE.

pub mod capability;
pub mod client;
pub mod copy;
pub mod expunge;
pub mod fetch;
pub mod flagsync;
pub mod idle;
pub mod select;
pub mod state;

pub use client::ImapClient;
pub use state::SessionState;
