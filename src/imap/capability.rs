//! Server capability tracking, parsed from the `CAPABILITY` response.
//! Grounded in the host application's `imap::capabilities`: a plain set of
//! uppercased tokens with a few named accessors for the ones this crate
//! branches on.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct CapabilitySet(HashSet<String>);

impl CapabilitySet {
    pub fn parse(line: &str) -> Self {
        let tokens = line
            .split_whitespace()
            .filter(|t| !t.eq_ignore_ascii_case("CAPABILITY"))
            .map(|t| t.to_ascii_uppercase())
            .collect();
        Self(tokens)
    }

    pub fn has(&self, token: &str) -> bool {
        self.0.contains(&token.to_ascii_uppercase())
    }

    pub fn supports_idle(&self) -> bool {
        self.has("IDLE")
    }

    pub fn supports_starttls(&self) -> bool {
        self.has("STARTTLS")
    }

    pub fn supports_uidplus(&self) -> bool {
        self.has("UIDPLUS")
    }

    /// Every `AUTH=` mechanism the server advertised, uppercased and
    /// stripped of the prefix (`"PLAIN"`, `"XOAUTH2"`, ...).
    pub fn auth_mechanisms(&self) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|t| t.strip_prefix("AUTH=").map(|m| m.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_capability_keyword() {
        let caps = CapabilitySet::parse("CAPABILITY IMAP4rev1 IDLE STARTTLS");
        assert!(caps.has("IDLE"));
        assert!(caps.has("imap4rev1"));
        assert!(!caps.has("CAPABILITY"));
    }

    #[test]
    fn supports_idle_reflects_token() {
        let caps = CapabilitySet::parse("CAPABILITY IMAP4rev1 IDLE");
        assert!(caps.supports_idle());
        let caps2 = CapabilitySet::parse("CAPABILITY IMAP4rev1");
        assert!(!caps2.supports_idle());
    }

    #[test]
    fn auth_mechanisms_extracted() {
        let caps = CapabilitySet::parse("CAPABILITY IMAP4rev1 AUTH=PLAIN AUTH=XOAUTH2");
        let mut mechs = caps.auth_mechanisms();
        mechs.sort();
        assert_eq!(mechs, vec!["PLAIN".to_string(), "XOAUTH2".to_string()]);
    }
}
