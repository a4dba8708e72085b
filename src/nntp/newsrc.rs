//! `.newsrc`-format subscription and read-state tracking: one line per
//! group, `group: ranges` if subscribed or `group! ranges` if not, where
//! `ranges` is a comma-separated list of read article numbers/ranges —
//! the same wire-adjacent shape the message-set batcher already produces,
//! reused here for the on-disk format instead of inventing a second one.

use crate::sync::batcher::{batch_into_ranges, IdRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupState {
    pub name: String,
    pub subscribed: bool,
    pub read: Vec<IdRange>,
}

impl GroupState {
    pub fn is_read(&self, number: u32) -> bool {
        self.read.iter().any(|r| number >= r.start && number <= r.end)
    }

    pub fn mark_read(&mut self, numbers: &[u32]) {
        let mut all: Vec<u32> = self.read.iter().flat_map(|r| r.start..=r.end).collect();
        all.extend_from_slice(numbers);
        self.read = batch_into_ranges(&all);
    }
}

/// Parses a complete `.newsrc` file into per-group state, skipping blank
/// and malformed lines rather than failing the whole file over one bad
/// entry — NeoMutt's own newsrc reader is similarly tolerant since the file
/// is hand-edited by users often enough to be unreliable.
pub fn parse(contents: &str) -> Vec<GroupState> {
    contents.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<GroupState> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, rest, subscribed) = if let Some((n, r)) = line.split_once(": ") {
        (n, r, true)
    } else if let Some((n, r)) = line.split_once("! ") {
        (n, r, false)
    } else if let Some(n) = line.strip_suffix(':') {
        (n, "", true)
    } else if let Some(n) = line.strip_suffix('!') {
        (n, "", false)
    } else {
        return None;
    };

    let mut numbers = Vec::new();
    for token in rest.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some((start, end)) = token.split_once('-') {
            if let (Ok(s), Ok(e)) = (start.parse(), end.parse()) {
                numbers.push(IdRange { start: s, end: e });
                continue;
            }
        }
        if let Ok(n) = token.parse() {
            numbers.push(IdRange::single(n));
        }
    }

    Some(GroupState {
        name: name.to_string(),
        subscribed,
        read: numbers,
    })
}

/// Serializes group states back to `.newsrc` text, one line per group, in
/// the order given.
pub fn serialize(groups: &[GroupState]) -> String {
    let mut out = String::new();
    for g in groups {
        let marker = if g.subscribed { ": " } else { "! " };
        let ranges = g
            .read
            .iter()
            .map(|r| {
                if r.start == r.end {
                    r.start.to_string()
                } else {
                    format!("{}-{}", r.start, r.end)
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&g.name);
        out.push_str(marker);
        out.push_str(&ranges);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribed_group_with_ranges() {
        let groups = parse("comp.lang.rust: 1-50,52,60-70\n");
        assert_eq!(groups.len(), 1);
        assert!(groups[0].subscribed);
        assert_eq!(groups[0].read.len(), 3);
    }

    #[test]
    fn parses_unsubscribed_group() {
        let groups = parse("comp.lang.rust! 1-10\n");
        assert!(!groups[0].subscribed);
    }

    #[test]
    fn round_trips_through_serialize() {
        let original = "comp.lang.rust: 1-50,52\nalt.test! 1-5\n";
        let groups = parse(original);
        let serialized = serialize(&groups);
        let reparsed = parse(&serialized);
        assert_eq!(groups, reparsed);
    }

    #[test]
    fn mark_read_merges_into_existing_ranges() {
        let mut group = GroupState {
            name: "g".to_string(),
            subscribed: true,
            read: vec![IdRange { start: 1, end: 5 }],
        };
        group.mark_read(&[6, 7]);
        assert_eq!(group.read, vec![IdRange { start: 1, end: 7 }]);
        assert!(group.is_read(6));
        assert!(!group.is_read(8));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let groups = parse("\n\ncomp.lang.rust: 1\n\n");
        assert_eq!(groups.len(), 1);
    }
}
