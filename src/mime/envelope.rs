//! The RFC 5322 envelope fields: the small, well-known set of headers every
//! client treats specially, as opposed to the arbitrary header soup in
//! `HeaderList`.

use serde::{Deserialize, Serialize};

use crate::primitives::address::AddressList;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub from: AddressList,
    pub sender: AddressList,
    pub to: AddressList,
    pub cc: AddressList,
    pub bcc: AddressList,
    pub reply_to: AddressList,
    pub subject: Option<String>,
    /// RFC 5322 date-time, already normalized to UTC by the parser.
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub message_id: Option<String>,
    pub in_reply_to: Vec<String>,
    pub references: Vec<String>,
    /// Newsgroups a posted article targets, comma-separated per RFC 5536.
    pub newsgroups: Vec<String>,
    pub followup_to: Vec<String>,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `References` value for a reply: the parent's `References`
    /// with its `Message-ID` appended, or just the parent's `Message-ID` if
    /// it had no `References` of its own, per RFC 5322 §3.6.4.
    pub fn reply_references(parent: &Envelope) -> Vec<String> {
        let mut refs = parent.references.clone();
        if let Some(mid) = &parent.message_id {
            if !refs.iter().any(|r| r == mid) {
                refs.push(mid.clone());
            }
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_references_appends_parent_message_id() {
        let mut parent = Envelope::new();
        parent.message_id = Some("<a@x>".to_string());
        parent.references = vec!["<root@x>".to_string()];
        let refs = Envelope::reply_references(&parent);
        assert_eq!(refs, vec!["<root@x>".to_string(), "<a@x>".to_string()]);
    }

    #[test]
    fn reply_references_handles_missing_references() {
        let mut parent = Envelope::new();
        parent.message_id = Some("<only@x>".to_string());
        let refs = Envelope::reply_references(&parent);
        assert_eq!(refs, vec!["<only@x>".to_string()]);
    }

    #[test]
    fn reply_references_does_not_duplicate_message_id() {
        let mut parent = Envelope::new();
        parent.message_id = Some("<a@x>".to_string());
        parent.references = vec!["<root@x>".to_string(), "<a@x>".to_string()];
        let refs = Envelope::reply_references(&parent);
        assert_eq!(refs, vec!["<root@x>".to_string(), "<a@x>".to_string()]);
    }
}
