//! RFC 2045 §6.8 base64 content transfer encoding: the `base64` crate does
//! the alphabet, this wraps its output at 76 characters per line as the
//! MIME spec requires (plain `base64` has no concept of MIME line wrapping).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const LINE_LEN: usize = 76;

pub fn encode(data: &[u8]) -> String {
    let raw = STANDARD.encode(data);
    let mut out = String::with_capacity(raw.len() + raw.len() / LINE_LEN * 2);
    for chunk in raw.as_bytes().chunks(LINE_LEN) {
        out.push_str(std::str::from_utf8(chunk).expect("base64 alphabet is ASCII"));
        out.push_str("\r\n");
    }
    out
}

pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let data: Vec<u8> = (0u8..=255).collect();
        let encoded = encode(&data);
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn wraps_at_76_chars() {
        let data = vec![0u8; 200];
        let encoded = encode(&data);
        for line in encoded.split("\r\n") {
            assert!(line.len() <= LINE_LEN);
        }
    }

    #[test]
    fn decode_tolerates_embedded_whitespace() {
        let encoded = "aGVs\r\nbG8=";
        assert_eq!(decode(encoded).unwrap(), b"hello");
    }
}
