//! Account and mailbox-connection types shared by the IMAP and NNTP
//! clients: the capability-tag dispatch that lets sync/cache code operate
//! uniformly over "whichever protocol this account uses" plus the small
//! per-account configuration each protocol needs to connect.

pub mod account;
pub mod connection;
pub mod mxops;

pub use account::{AccountConfig, Credentials};
pub use mxops::{MailboxKind, MxOps};
