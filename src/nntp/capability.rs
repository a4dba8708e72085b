//! NNTP `CAPABILITIES` (RFC 3977 §5.2) response parsing: one capability
//! label per line, some with arguments (`AUTHINFO USER`, `OVER MSGID`).

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CapabilitySet(HashMap<String, Vec<String>>);

impl CapabilitySet {
    pub fn parse(block: &str) -> Self {
        let mut map = HashMap::new();
        for line in block.lines() {
            let mut tokens = line.split_whitespace();
            if let Some(label) = tokens.next() {
                map.insert(
                    label.to_ascii_uppercase(),
                    tokens.map(|t| t.to_string()).collect(),
                );
            }
        }
        Self(map)
    }

    pub fn has(&self, label: &str) -> bool {
        self.0.contains_key(&label.to_ascii_uppercase())
    }

    pub fn args(&self, label: &str) -> Option<&[String]> {
        self.0.get(&label.to_ascii_uppercase()).map(|v| v.as_slice())
    }

    pub fn supports_posting(&self) -> bool {
        self.has("POST")
    }

    pub fn supports_over(&self) -> bool {
        self.has("OVER") || self.has("XOVER")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_with_and_without_args() {
        let block = "VERSION 2\r\nREADER\r\nPOST\r\nOVER MSGID\r\nAUTHINFO USER\r\n";
        let caps = CapabilitySet::parse(block);
        assert!(caps.supports_posting());
        assert!(caps.supports_over());
        assert_eq!(caps.args("OVER"), Some(&["MSGID".to_string()][..]));
    }

    #[test]
    fn missing_capability_is_false() {
        let caps = CapabilitySet::parse("READER\r\n");
        assert!(!caps.supports_posting());
    }
}
