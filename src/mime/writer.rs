//! Serializes an [`Email`] tree back to RFC 822/2045 wire bytes.
//!
//! Unlike the parser, the writer must handle trees that were never parsed
//! from bytes at all (a freshly composed message): every multipart
//! container needs a boundary, generated if one wasn't already set when the
//! tree came from a previous parse.

use rand::distr::{Alphanumeric, SampleString};

use crate::error::{ErrorKind, MailCoreResult};
use crate::mime::body::{AttachIdx, BodyKind, TransferEncoding};
use crate::mime::email::Email;
use crate::mime::encoding::{base64x, qp};
use crate::raise_error;

const BOUNDARY_LEN: usize = 32;

/// Generates a boundary string from a safe alphanumeric alphabet, retrying
/// if it collides with one already used in this tree (spec: "1-70 characters
/// from a safe alphabet, chosen randomly per container and re-chosen if
/// they collide").
pub fn generate_boundary(existing: &[String]) -> String {
    loop {
        let candidate = Alphanumeric.sample_string(&mut rand::rng(), BOUNDARY_LEN);
        if !existing.iter().any(|b| b == &candidate) {
            return candidate;
        }
    }
}

/// Serializes `email`'s tree rooted at its current root into complete
/// message bytes, including the top-level headers from `email.headers`.
pub fn write_message(email: &Email, max_depth: usize) -> MailCoreResult<Vec<u8>> {
    let mut out = Vec::new();
    for header in email.headers.iter() {
        out.extend_from_slice(header.name.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(header.value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }

    let root = email
        .root()
        .ok_or_else(|| raise_error!("cannot write an email with no root body".to_string(), ErrorKind::Parse))?;

    let body = email
        .get(root)
        .ok_or_else(|| raise_error!("root attach index does not resolve".to_string(), ErrorKind::Parse))?;
    out.extend_from_slice(b"Content-Type: ");
    out.extend_from_slice(body.full_mime_type().as_bytes());
    if let BodyKind::Multipart { boundary, .. } = &body.kind {
        out.extend_from_slice(format!("; boundary=\"{boundary}\"").as_bytes());
    }
    for p in body.parameters.iter() {
        out.extend_from_slice(format!("; {}=\"{}\"", p.name, p.value).as_bytes());
    }
    out.extend_from_slice(b"\r\n");
    if !matches!(body.kind, BodyKind::Multipart { .. }) {
        out.extend_from_slice(format!("Content-Transfer-Encoding: {}\r\n", body.encoding.as_str()).as_bytes());
    }
    out.extend_from_slice(b"\r\n");

    write_body(email, root, &mut out, 0, max_depth)?;
    Ok(out)
}

fn write_body(
    email: &Email,
    idx: AttachIdx,
    out: &mut Vec<u8>,
    depth: usize,
    max_depth: usize,
) -> MailCoreResult<()> {
    if depth > max_depth {
        return Err(raise_error!(
            "multipart nesting exceeds configured maximum depth".to_string(),
            ErrorKind::Parse
        ));
    }
    let body = email
        .get(idx)
        .ok_or_else(|| raise_error!("dangling attach index while writing".to_string(), ErrorKind::Parse))?;

    match &body.kind {
        BodyKind::Leaf => {
            let raw = leaf_bytes(email, idx)?;
            let encoded = match body.encoding {
                TransferEncoding::Base64 => base64x::encode(&raw),
                TransferEncoding::QuotedPrintable => qp::encode(&raw),
                _ => String::from_utf8_lossy(&raw).into_owned(),
            };
            out.extend_from_slice(encoded.as_bytes());
            if !encoded.ends_with("\r\n") {
                out.extend_from_slice(b"\r\n");
            }
        }
        BodyKind::Multipart { boundary, children } => {
            for child in children {
                out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
                let child_body = email.get(*child).ok_or_else(|| {
                    raise_error!("dangling child attach index while writing".to_string(), ErrorKind::Parse)
                })?;
                out.extend_from_slice(b"Content-Type: ");
                out.extend_from_slice(child_body.full_mime_type().as_bytes());
                for p in child_body.parameters.iter() {
                    out.extend_from_slice(format!("; {}=\"{}\"", p.name, p.value).as_bytes());
                }
                out.extend_from_slice(b"\r\n");
                if let Some(disposition) = &child_body.disposition {
                    out.extend_from_slice(format!("Content-Disposition: {disposition}").as_bytes());
                    for p in child_body.disposition_params.iter() {
                        out.extend_from_slice(format!("; {}=\"{}\"", p.name, p.value).as_bytes());
                    }
                    out.extend_from_slice(b"\r\n");
                }
                if !child_body.is_multipart() {
                    out.extend_from_slice(
                        format!("Content-Transfer-Encoding: {}\r\n", child_body.encoding.as_str()).as_bytes(),
                    );
                }
                out.extend_from_slice(b"\r\n");
                write_body(email, *child, out, depth + 1, max_depth)?;
            }
            out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        }
        BodyKind::EmbeddedMessage { child } => {
            write_body(email, *child, out, depth + 1, max_depth)?;
        }
    }
    Ok(())
}

fn leaf_bytes(email: &Email, idx: AttachIdx) -> MailCoreResult<Vec<u8>> {
    let body = email.get(idx).expect("validated by caller");
    if let (Some(span), Some(source)) = (body.span, &email.source) {
        if let Some(slice) = span.slice(source) {
            return Ok(slice.to_vec());
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::body::Body;

    #[test]
    fn generate_boundary_avoids_collisions() {
        let existing = vec!["AAAA".to_string()];
        let boundary = generate_boundary(&existing);
        assert!(!existing.contains(&boundary));
        assert_eq!(boundary.len(), BOUNDARY_LEN);
    }

    #[test]
    fn write_simple_leaf_message() {
        let mut email = Email::new();
        email.headers.push("Subject", "hi");
        let mut leaf = Body::new_leaf("text", "plain");
        leaf.span = Some(crate::primitives::buffer::ByteSpan::new(0, 5));
        email.source = Some(b"hello".to_vec());
        let idx = email.insert(leaf);
        email.set_root(idx);
        let out = write_message(&email, 30).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Subject: hi"));
        assert!(text.contains("Content-Type: text/plain"));
        assert!(text.contains("hello"));
    }

    #[test]
    fn write_multipart_includes_boundary_markers() {
        let mut email = Email::new();
        let parent = email.insert(Body::new_multipart("mixed", "BOUND"));
        let mut child = Body::new_leaf("text", "plain");
        child.span = Some(crate::primitives::buffer::ByteSpan::new(0, 4));
        email.source = Some(b"part".to_vec());
        let child_idx = email.insert(child);
        email.attach_child(parent, child_idx).unwrap();
        email.set_root(parent);
        let out = write_message(&email, 30).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--BOUND"));
        assert!(text.contains("--BOUND--"));
    }
}
