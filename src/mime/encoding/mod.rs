//! Content and header encodings: quoted-printable, base64 framing, RFC 2047
//! encoded-words, and charset transcoding via `encoding_rs`.

pub mod base64x;
pub mod qp;
pub mod rfc2047;
pub mod transcode;

pub use transcode::TranscodeError;
