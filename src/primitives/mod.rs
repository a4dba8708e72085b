//! Shared low-level data types used by the MIME engine and both protocol
//! clients: addresses, parameter lists, raw headers, and small string/byte
//! utilities that don't belong to any one higher module.

pub mod address;
pub mod buffer;
pub mod headers;
pub mod params;
pub mod strutil;

pub use address::{Address, AddressList};
pub use headers::{Header, HeaderList};
pub use params::{Parameter, ParameterList};
