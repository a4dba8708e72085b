//! RFC 822/2822 address values: a single mailbox (`user@example.com`, with
//! an optional display name) and ordered lists of them as they appear in
//! `To`/`Cc`/`From`/`Reply-To`.
//!
//! Parsing the full grammar (groups, comments, quoted strings) is delegated
//! to the MIME engine's parser (`crate::mime::parser`), which builds these
//! from `mail_parser::Addr`; this module owns the value types and the
//! rendering side (RFC 2047 encoding of the display name happens in
//! `crate::mime::encoding`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single mailbox: `"Display Name" <user@example.com>` or bare `user@example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub mailbox: String,
}

impl Address {
    pub fn new(mailbox: impl Into<String>) -> Self {
        Self {
            name: None,
            mailbox: mailbox.into(),
        }
    }

    pub fn with_name(name: impl Into<String>, mailbox: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            mailbox: mailbox.into(),
        }
    }

    /// The part after `@`, or the whole mailbox if there's no `@` (group markers).
    pub fn host(&self) -> Option<&str> {
        self.mailbox.split('@').nth(1)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) if !name.is_empty() => write!(f, "\"{}\" <{}>", name, self.mailbox),
            _ => write!(f, "{}", self.mailbox),
        }
    }
}

/// An ordered list of addresses, as found in a single header occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressList(pub Vec<Address>);

impl AddressList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, addr: Address) {
        self.0.push(addr);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.0.iter()
    }

    /// True if any address in the list has this mailbox, case-insensitively
    /// (mailboxes are case-insensitive on the domain part only per RFC 5321,
    /// but NeoMutt and most clients compare the whole string case-insensitively
    /// for "is this me" checks, so we match that).
    pub fn contains_mailbox(&self, mailbox: &str) -> bool {
        self.0
            .iter()
            .any(|a| a.mailbox.eq_ignore_ascii_case(mailbox))
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

impl FromIterator<Address> for AddressList {
    fn from_iter<T: IntoIterator<Item = Address>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_name() {
        let a = Address::with_name("Jane Doe", "jane@example.com");
        assert_eq!(a.to_string(), "\"Jane Doe\" <jane@example.com>");
    }

    #[test]
    fn display_bare_mailbox() {
        let a = Address::new("jane@example.com");
        assert_eq!(a.to_string(), "jane@example.com");
    }

    #[test]
    fn host_extracts_domain() {
        let a = Address::new("jane@example.com");
        assert_eq!(a.host(), Some("example.com"));
    }

    #[test]
    fn contains_mailbox_is_case_insensitive() {
        let list: AddressList = vec![Address::new("Jane@Example.com")].into_iter().collect();
        assert!(list.contains_mailbox("jane@example.com"));
    }

    #[test]
    fn list_display_joins_with_comma() {
        let list: AddressList = vec![Address::new("a@x.com"), Address::new("b@x.com")]
            .into_iter()
            .collect();
        assert_eq!(list.to_string(), "a@x.com, b@x.com");
    }
}
