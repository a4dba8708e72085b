//! RFC 2045 §6.7 quoted-printable: hex-escaping of non-printable/non-ASCII
//! bytes with soft line breaks (`=\r\n`) so no output line exceeds 76
//! characters.

const LINE_LIMIT: usize = 76;

fn needs_escape(b: u8) -> bool {
    !(b == b'\t' || (0x20..=0x7e).contains(&b) && b != b'=')
}

/// True when `line` is a line RFC 2045 requires to have its leading byte
/// hex-escaped so it can't be mistaken for an mbox `From ` separator or a
/// lone-dot transport terminator: a line that's exactly `.`, or one
/// beginning `From ` / `from `.
fn needs_line_start_escape(line: &[u8]) -> bool {
    line == b"." || line.starts_with(b"From ") || line.starts_with(b"from ")
}

/// Encodes `data` as quoted-printable body text. Trailing whitespace on a
/// line is always escaped (RFC 2045 rule 3) since it would otherwise be
/// silently stripped by some transports. A line that's exactly `.` or
/// begins `From `/`from ` has its first byte hex-escaped too, so the
/// encoded form can't collide with a dot-terminator or mbox separator.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() + data.len() / 4);
    let mut col = 0usize;

    let push_soft_break = |out: &mut String, col: &mut usize| {
        out.push_str("=\r\n");
        *col = 0;
    };

    let lines = data.split(|&b| b == b'\n');
    let line_count = data.split(|&b| b == b'\n').count();
    for (line_idx, raw_line) in lines.enumerate() {
        let line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);
        let escape_first = needs_line_start_escape(line);
        for (i, &b) in line.iter().enumerate() {
            let is_last = i + 1 == line.len();
            let trailing_ws = is_last && (b == b' ' || b == b'\t');
            if col >= LINE_LIMIT - 1 {
                push_soft_break(&mut out, &mut col);
            }
            if needs_escape(b) || trailing_ws || (i == 0 && escape_first) {
                out.push_str(&format!("={:02X}", b));
                col += 3;
            } else {
                out.push(b as char);
                col += 1;
            }
        }
        if line_idx + 1 < line_count {
            out.push_str("\r\n");
            col = 0;
        }
    }
    out
}

/// Decodes quoted-printable text back to raw bytes, undoing soft line
/// breaks and `=XX` hex escapes. Malformed escapes (non-hex after `=`) pass
/// the `=` through literally, matching how most mail readers tolerate them.
pub fn decode(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'=' => {
                if bytes[i..].starts_with(b"=\r\n") {
                    i += 3;
                } else if bytes[i..].starts_with(b"=\n") {
                    i += 2;
                } else if i + 2 < bytes.len() {
                    let hex = &text[i + 1..i + 3];
                    match u8::from_str_radix(hex, 16) {
                        Ok(byte) => {
                            out.push(byte);
                            i += 3;
                        }
                        Err(_) => {
                            out.push(b'=');
                            i += 1;
                        }
                    }
                } else {
                    out.push(b'=');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip_ascii() {
        let data = b"Hello, world!";
        let encoded = encode(data);
        assert_eq!(decode(&encoded), data);
    }

    #[test]
    fn encode_escapes_equals_sign() {
        let encoded = encode(b"a=b");
        assert_eq!(encoded, "a=3Db");
    }

    #[test]
    fn encode_escapes_trailing_space() {
        let encoded = encode(b"trailing \r\nnext");
        assert!(encoded.contains("=20"));
    }

    #[test]
    fn decode_handles_soft_line_break() {
        let decoded = decode("abc=\r\ndef");
        assert_eq!(decoded, b"abcdef");
    }

    #[test]
    fn encode_wraps_long_lines_with_soft_break() {
        let data = vec![b'A'; 200];
        let encoded = encode(&data);
        assert!(encoded.contains("=\r\n"));
        assert_eq!(decode(&encoded), data);
    }

    #[test]
    fn encode_escapes_leading_from_to_avoid_mbox_separator() {
        let encoded = encode(b"From now on");
        assert_eq!(encoded, "=46rom now on");
        assert_eq!(decode(&encoded), b"From now on");
    }

    #[test]
    fn encode_escapes_leading_lowercase_from() {
        let encoded = encode(b"from the start");
        assert_eq!(encoded, "=66rom the start");
    }

    #[test]
    fn encode_escapes_lone_dot_line() {
        let encoded = encode(b".");
        assert_eq!(encoded, "=2E");
        assert_eq!(decode(&encoded), b".");
    }

    #[test]
    fn encode_does_not_escape_dot_inside_longer_line() {
        let encoded = encode(b".hello");
        assert_eq!(encoded, ".hello");
    }

    #[test]
    fn encode_does_not_escape_from_mid_line() {
        let encoded = encode(b"not From now on");
        assert_eq!(encoded, "not From now on");
    }
}
