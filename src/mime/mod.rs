//! RFC 822/2045/2047/2231 message engine: parsing wire bytes into an
//! [`Email`](email::Email) tree, writing one back out, transfer-encoding
//! selection, and the header-copy engine used when forwarding/bouncing.

pub mod body;
pub mod content_profile;
pub mod email;
pub mod encoding;
pub mod envelope;
pub mod headercopy;
pub mod parser;
pub mod writer;

pub use body::{AttachIdx, Body, BodyKind};
pub use email::Email;
pub use envelope::Envelope;
