//! Message-set / UID-range batcher.
//!
//! Given an arbitrary, possibly unsorted set of message numbers or UIDs,
//! produces the fewest contiguous ranges that describe it, suitable for an
//! IMAP `UID FETCH 3:5,9,20:22` set or an NNTP `XOVER` range. The caller's
//! original order is never assumed meaningful for the wire request, but
//! result ranges are emitted in ascending order (sort-then-restore: we sort
//! to batch, then the caller restores presentation order, if any, by
//! re-keying fetched results against the ids they asked for).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub start: u32,
    pub end: u32,
}

impl IdRange {
    pub fn single(id: u32) -> Self {
        Self { start: id, end: id }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Renders as IMAP/NNTP wire syntax: `"5"` for a single id, `"3:9"` for a range.
    pub fn to_wire(&self) -> String {
        if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

/// Sorts and deduplicates `ids`, then coalesces consecutive runs into
/// ranges. Empty input yields an empty `Vec`, not an error — an empty
/// message-set batch is a legitimate "nothing to fetch" result.
pub fn batch_into_ranges(ids: &[u32]) -> Vec<IdRange> {
    if ids.is_empty() {
        return Vec::new();
    }
    let mut sorted: Vec<u32> = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut ranges = Vec::new();
    let mut start = sorted[0];
    let mut prev = sorted[0];
    for &id in &sorted[1..] {
        if id == prev + 1 {
            prev = id;
            continue;
        }
        ranges.push(IdRange { start, end: prev });
        start = id;
        prev = id;
    }
    ranges.push(IdRange { start, end: prev });
    ranges
}

/// Joins ranges into a single wire-format message-set string, e.g.
/// `"3:5,9,20:22"`. Unbounded — only safe when the caller already knows the
/// result fits the server's command-line limit. Most callers want
/// [`ranges_to_wire_chunks`] instead.
pub fn ranges_to_wire(ranges: &[IdRange]) -> String {
    ranges
        .iter()
        .map(|r| r.to_wire())
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins ranges into wire-format message-set strings, splitting onto a new
/// line whenever appending the next range would push the current line past
/// `max_len` (`IMAP_MAX_CMDLEN`). Guarantees `length(line) <= max_len` for
/// every emitted line, except a single range whose own rendering already
/// exceeds `max_len` — that range is emitted alone rather than silently
/// dropped, since splitting a contiguous range across two lines would need
/// to fabricate a midpoint the caller never asked for.
pub fn ranges_to_wire_chunks(ranges: &[IdRange], max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for r in ranges {
        let piece = r.to_wire();
        let needed = if current.is_empty() {
            piece.len()
        } else {
            current.len() + 1 + piece.len()
        };
        if !current.is_empty() && needed > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(',');
        }
        current.push_str(&piece);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Batches `ids` into ranges and renders them straight to wire-format
/// chunks, each at most `max_len` bytes long.
pub fn batch_into_wire_chunks(ids: &[u32], max_len: usize) -> Vec<String> {
    ranges_to_wire_chunks(&batch_into_ranges(ids), max_len)
}
