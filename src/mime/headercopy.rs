//! Header-copy engine: the pass used whenever a message is forwarded,
//! bounced, or displayed "with headers" — decide which headers survive
//! (weed/unignore), in what order (`ConfigView::header_order`), and how long
//! lines are folded (`ConfigView::wrap_len`). Grounded in NeoMutt's
//! `mutt_copy_header` (`copy.c`).

use crate::config::ConfigView;
use crate::primitives::headers::HeaderList;
use crate::primitives::strutil::fold_line;

/// An Autocrypt gossip header pulled out of the header set during a copy,
/// routed to a side channel instead of the normal output (NeoMutt invokes
/// Autocrypt gossip processing unconditionally whenever this header is
/// present, independent of whether the header itself is being weeded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocryptHeader {
    pub raw_value: String,
}

/// Copies `headers` into output order, applying weeding, wrapping, and
/// Autocrypt extraction. `out_autocrypt` receives every `Autocrypt` header
/// encountered, in source order, regardless of whether it would otherwise
/// have been weeded — Autocrypt gossip is processed even when headers are
/// hidden from the human-readable copy.
pub fn copy_headers(
    headers: &HeaderList,
    config: &ConfigView,
    out_autocrypt: &mut Vec<AutocryptHeader>,
) -> Vec<String> {
    for h in headers.iter() {
        if h.name.eq_ignore_ascii_case("autocrypt") {
            out_autocrypt.push(AutocryptHeader {
                raw_value: h.value.clone(),
            });
        }
    }

    let kept: Vec<&crate::primitives::headers::Header> = headers
        .iter()
        .filter(|h| is_kept(&h.name, config))
        .collect();

    let ordered = order_headers(kept, &config.header_order);

    ordered
        .into_iter()
        .map(|h| {
            let line = format!("{}: {}", h.name, h.value);
            fold_line(&line, config.wrap_len)
        })
        .collect()
}

fn is_kept(name: &str, config: &ConfigView) -> bool {
    let weeded = config
        .weed_list
        .iter()
        .any(|w| name.eq_ignore_ascii_case(w));
    if !weeded {
        return true;
    }
    config
        .unignore_list
        .iter()
        .any(|u| name.to_ascii_lowercase().starts_with(&u.to_ascii_lowercase()))
}

/// Reorders `headers` so any name appearing in `order` comes first, in
/// `order`'s sequence; everything else keeps its original relative order
/// appended after. NeoMutt's `HeaderOrderList` behaves the same way: headers
/// not mentioned aren't dropped, just left where the configured list ends.
fn order_headers<'a>(
    headers: Vec<&'a crate::primitives::headers::Header>,
    order: &[String],
) -> Vec<&'a crate::primitives::headers::Header> {
    if order.is_empty() {
        return headers;
    }
    let mut remaining = headers;
    let mut out = Vec::with_capacity(remaining.len());
    for wanted in order {
        let mut i = 0;
        while i < remaining.len() {
            if remaining[i].name.eq_ignore_ascii_case(wanted) {
                out.push(remaining.remove(i));
            } else {
                i += 1;
            }
        }
    }
    out.extend(remaining);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(weed: &[&str], unignore: &[&str], order: &[&str]) -> ConfigView {
        ConfigView {
            weed_list: weed.iter().map(|s| s.to_string()).collect(),
            unignore_list: unignore.iter().map(|s| s.to_string()).collect(),
            header_order: order.iter().map(|s| s.to_string()).collect(),
            ..ConfigView::default()
        }
    }

    #[test]
    fn weeded_header_dropped() {
        let mut headers = HeaderList::new();
        headers.push("X-Spam-Score", "9.9");
        headers.push("Subject", "hi");
        let config = config_with(&["x-spam-score"], &[], &[]);
        let mut autocrypt = Vec::new();
        let copied = copy_headers(&headers, &config, &mut autocrypt);
        assert_eq!(copied, vec!["Subject: hi".to_string()]);
    }

    #[test]
    fn unignore_overrides_weed_by_prefix() {
        let mut headers = HeaderList::new();
        headers.push("X-Spam-Score", "9.9");
        headers.push("X-Other", "drop me");
        let config = config_with(&["x-"], &["x-spam"], &[]);
        let mut autocrypt = Vec::new();
        let copied = copy_headers(&headers, &config, &mut autocrypt);
        assert_eq!(copied, vec!["X-Spam-Score: 9.9".to_string()]);
    }

    #[test]
    fn autocrypt_extracted_even_when_weeded() {
        let mut headers = HeaderList::new();
        headers.push("Autocrypt", "addr=a@x.com; keydata=ABCD");
        let config = config_with(&["autocrypt"], &[], &[]);
        let mut autocrypt = Vec::new();
        let copied = copy_headers(&headers, &config, &mut autocrypt);
        assert!(copied.is_empty());
        assert_eq!(autocrypt.len(), 1);
        assert!(autocrypt[0].raw_value.contains("addr=a@x.com"));
    }

    #[test]
    fn header_order_moves_named_headers_first() {
        let mut headers = HeaderList::new();
        headers.push("Subject", "hi");
        headers.push("From", "a@x.com");
        headers.push("To", "b@x.com");
        let config = config_with(&[], &[], &["to", "from"]);
        let mut autocrypt = Vec::new();
        let copied = copy_headers(&headers, &config, &mut autocrypt);
        assert_eq!(
            copied,
            vec![
                "To: b@x.com".to_string(),
                "From: a@x.com".to_string(),
                "Subject: hi".to_string(),
            ]
        );
    }
}
