//! Seam for PGP/S-MIME support. The actual crypto implementation lives
//! outside this crate (Non-goal: "PGP/S-MIME internals"); this module only
//! defines the trait the compose pipeline and header-copy engine call
//! through, plus a no-op implementation for hosts that don't wire one up.

use crate::mime::headercopy::AutocryptHeader;

/// What the compose/copy pipeline needs from a crypto backend, independent
/// of which one (if any) the host application provides.
pub trait CryptoBackend: Send + Sync {
    /// Processes gossip keys found in an `Autocrypt` header during a header
    /// copy. A no-op backend simply drops them.
    fn process_autocrypt_gossip(&self, header: &AutocryptHeader);

    /// True if outgoing mail to `recipient` should be opportunistically
    /// encrypted because we hold a key for them, absent an explicit user
    /// override. See `DESIGN.md` for how this ranks against user choice.
    fn has_opportunistic_key_for(&self, recipient: &str) -> bool;
}

/// Backend used when the host application hasn't configured one: crypto is
/// simply off.
pub struct NoCrypto;

impl CryptoBackend for NoCrypto {
    fn process_autocrypt_gossip(&self, _header: &AutocryptHeader) {}

    fn has_opportunistic_key_for(&self, _recipient: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_crypto_never_claims_opportunistic_keys() {
        let backend = NoCrypto;
        assert!(!backend.has_opportunistic_key_for("anyone@example.com"));
    }
}
