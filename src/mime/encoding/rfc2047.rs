//! RFC 2047 encoded-words: `=?charset?Q?...?=` / `=?charset?B?...?=`, used
//! to put non-ASCII text into header fields that are otherwise restricted
//! to US-ASCII.

use crate::mime::encoding::{base64x, qp};

/// Decodes every encoded-word found in `header_value`, leaving unrecognized
/// text untouched. Adjacent encoded-words separated only by folding
/// whitespace are joined per RFC 2047 §6.2 ("White space between adjacent
/// encoded-words is not displayed").
pub fn decode(header_value: &str) -> String {
    let mut out = String::with_capacity(header_value.len());
    let mut rest = header_value;
    let mut last_was_encoded_word = false;

    while let Some(start) = rest.find("=?") {
        let (plain, tail) = rest.split_at(start);
        if !(last_was_encoded_word && plain.chars().all(|c| c.is_whitespace())) {
            out.push_str(plain);
        }
        match parse_one(tail) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &tail[consumed..];
                last_was_encoded_word = true;
            }
            None => {
                out.push_str(&tail[..2]);
                rest = &tail[2..];
                last_was_encoded_word = false;
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_one(s: &str) -> Option<(String, usize)> {
    debug_assert!(s.starts_with("=?"));
    let rest = &s[2..];
    let charset_end = rest.find('?')?;
    let charset = &rest[..charset_end];
    let rest = &rest[charset_end + 1..];
    let mut chars = rest.chars();
    let encoding = chars.next()?;
    if chars.next()? != '?' {
        return None;
    }
    let after_marker = &rest[2..];
    let text_end = after_marker.find("?=")?;
    let encoded_text = &after_marker[..text_end];

    let raw_bytes = match encoding.to_ascii_uppercase() {
        'Q' => qp::decode(&encoded_text.replace('_', " ")),
        'B' => base64x::decode(encoded_text).ok()?,
        _ => return None,
    };
    let decoded = transcode_to_utf8(charset, &raw_bytes)?;
    let total_len = 2 + charset_end + 1 + 2 + text_end + 2;
    Some((decoded, total_len))
}

fn transcode_to_utf8(charset: &str, bytes: &[u8]) -> Option<String> {
    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes())
        .unwrap_or(encoding_rs::UTF_8);
    let (decoded, _, _had_errors) = encoding.decode(bytes);
    Some(decoded.into_owned())
}

/// Encodes `text` as a single RFC 2047 Q-encoded word in UTF-8 if it
/// contains any non-ASCII byte; returns it unchanged otherwise. Headers
/// rarely need B-encoding for short display names, so this always picks Q.
pub fn encode_if_needed(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    let qp_body: String = text
        .bytes()
        .map(|b| match b {
            b'_' | b'?' | b'=' => format!("={:02X}", b),
            0x20..=0x7e => (b as char).to_string(),
            _ => format!("={:02X}", b),
        })
        .collect();
    format!("=?UTF-8?Q?{}?=", qp_body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_passes_plain_ascii_through() {
        assert_eq!(decode("plain subject"), "plain subject");
    }

    #[test]
    fn decode_q_encoded_word() {
        assert_eq!(decode("=?UTF-8?Q?Caf=C3=A9?="), "Café");
    }

    #[test]
    fn decode_b_encoded_word() {
        // "Café" in UTF-8 base64
        assert_eq!(decode("=?UTF-8?B?Q2Fmw6k=?="), "Café");
    }

    #[test]
    fn encode_if_needed_leaves_ascii_untouched() {
        assert_eq!(encode_if_needed("Jane Doe"), "Jane Doe");
    }

    #[test]
    fn encode_if_needed_encodes_non_ascii() {
        let encoded = encode_if_needed("Café");
        assert!(encoded.starts_with("=?UTF-8?Q?"));
        assert_eq!(decode(&encoded), "Café");
    }
}
