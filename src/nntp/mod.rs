//! NNTP (RFC 3977) client, hand-rolled over the same `MailStream` transport
//! the IMAP client uses, since no NNTP crate sits in the adopted dependency
//! stack. Organized the way the IMAP module separates concerns: connection
//! setup, a session state machine, capability tracking, and per-feature
//! operations (group selection, overview fetch, article retrieval,
//! newsrc bookkeeping, posting).

pub mod article;
pub mod capability;
pub mod connection;
pub mod group;
pub mod newsrc;
pub mod overview;
pub mod post;
pub mod state;

pub use connection::NntpClient;
pub use state::NntpState;
