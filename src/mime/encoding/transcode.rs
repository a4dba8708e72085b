//! Charset transcoding for body text, layered over `encoding_rs`. Header
//! encoded-words have their own decode path in `rfc2047`; this is for full
//! body content tagged by a `Content-Type: charset=` parameter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("unknown charset label: {0}")]
    UnknownCharset(String),
}

/// Decodes `bytes` from `charset` into a UTF-8 `String`. Unrecognized
/// charset labels are an error rather than a silent UTF-8 fallback, since a
/// mislabeled charset should surface instead of mojibake slipping through
/// unnoticed.
pub fn decode_to_utf8(charset: &str, bytes: &[u8]) -> Result<String, TranscodeError> {
    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| TranscodeError::UnknownCharset(charset.to_string()))?;
    let (text, _, _had_errors) = encoding.decode(bytes);
    Ok(text.into_owned())
}

/// Encodes `text` into `charset`'s byte representation for outbound
/// composition (e.g. a reply kept in the original poster's charset).
pub fn encode_from_utf8(charset: &str, text: &str) -> Result<Vec<u8>, TranscodeError> {
    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| TranscodeError::UnknownCharset(charset.to_string()))?;
    let (bytes, _, _had_errors) = encoding.encode(text);
    Ok(bytes.into_owned())
}

impl From<TranscodeError> for crate::error::MailCoreError {
    fn from(e: TranscodeError) -> Self {
        crate::raise_error!(e.to_string(), crate::error::ErrorKind::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_utf8_is_identity() {
        assert_eq!(decode_to_utf8("utf-8", "héllo".as_bytes()).unwrap(), "héllo");
    }

    #[test]
    fn decode_unknown_charset_errors() {
        assert!(decode_to_utf8("not-a-real-charset", b"x").is_err());
    }

    #[test]
    fn encode_decode_round_trip_latin1() {
        let original = "café";
        let encoded = encode_from_utf8("iso-8859-1", original).unwrap();
        let decoded = decode_to_utf8("iso-8859-1", &encoded).unwrap();
        assert_eq!(decoded, original);
    }
}
