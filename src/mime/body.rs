//! The MIME body tree.
//!
//! NeoMutt represents a message's body as a graph of `Body*` nodes linked by
//! `next`/`parts`/`hdr` pointers, with no enforced ownership and the
//! occasional back-pointer cycle (a message part pointing at an embedded
//! `Email`, which itself owns bodies). We replace that with a flat arena
//! (`Email::arena`) and stable `AttachIdx` handles: a `Body` never owns its
//! children directly, it names them by index, so the tree can't form a
//! reference cycle and can be walked or mutated without unsafe code.

use crate::primitives::buffer::ByteSpan;
use crate::primitives::params::ParameterList;

/// A stable handle to a [`Body`] node inside an [`crate::mime::email::Email`]'s
/// arena. Cheap to copy, meaningless outside the arena that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachIdx(pub u32);

/// How a leaf body's raw bytes relate to what the content actually is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    SevenBit,
    EightBit,
    Binary,
    QuotedPrintable,
    Base64,
}

impl TransferEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferEncoding::SevenBit => "7bit",
            TransferEncoding::EightBit => "8bit",
            TransferEncoding::Binary => "binary",
            TransferEncoding::QuotedPrintable => "quoted-printable",
            TransferEncoding::Base64 => "base64",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "8bit" => TransferEncoding::EightBit,
            "binary" => TransferEncoding::Binary,
            "quoted-printable" => TransferEncoding::QuotedPrintable,
            "base64" => TransferEncoding::Base64,
            _ => TransferEncoding::SevenBit,
        }
    }
}

/// The shape of a body node: a leaf with content, or a container with children.
#[derive(Debug, Clone)]
pub enum BodyKind {
    /// A single non-multipart part: text, an image, an attached file, ...
    Leaf,
    /// `multipart/*`: children are ordered parts separated by a boundary.
    Multipart { boundary: String, children: Vec<AttachIdx> },
    /// `message/rfc822`: a single child that is itself a complete message.
    EmbeddedMessage { child: AttachIdx },
}

/// One node of the MIME tree: a `Content-Type`, its parameters, its transfer
/// encoding, and either its own bytes (leaf) or its children (container).
#[derive(Debug, Clone)]
pub struct Body {
    pub content_type: String,
    pub content_subtype: String,
    pub parameters: ParameterList,
    pub disposition: Option<String>,
    pub disposition_params: ParameterList,
    pub encoding: TransferEncoding,
    pub description: Option<String>,
    pub content_id: Option<String>,
    /// Where this node's *encoded* bytes live in the original source buffer,
    /// if this tree came from parsing (absent for freshly composed bodies).
    pub span: Option<ByteSpan>,
    pub kind: BodyKind,
}

impl Body {
    pub fn new_leaf(content_type: impl Into<String>, content_subtype: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content_subtype: content_subtype.into(),
            parameters: ParameterList::new(),
            disposition: None,
            disposition_params: ParameterList::new(),
            encoding: TransferEncoding::SevenBit,
            description: None,
            content_id: None,
            span: None,
            kind: BodyKind::Leaf,
        }
    }

    pub fn new_multipart(subtype: impl Into<String>, boundary: impl Into<String>) -> Self {
        Self {
            content_type: "multipart".to_string(),
            content_subtype: subtype.into(),
            parameters: ParameterList::new(),
            disposition: None,
            disposition_params: ParameterList::new(),
            encoding: TransferEncoding::SevenBit,
            description: None,
            content_id: None,
            span: None,
            kind: BodyKind::Multipart {
                boundary: boundary.into(),
                children: Vec::new(),
            },
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.kind, BodyKind::Multipart { .. })
    }

    pub fn full_mime_type(&self) -> String {
        format!("{}/{}", self.content_type, self.content_subtype)
    }

    pub fn filename(&self) -> Option<&str> {
        self.disposition_params
            .get("filename")
            .or_else(|| self.parameters.get("name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mime_type_joins_type_and_subtype() {
        let b = Body::new_leaf("text", "plain");
        assert_eq!(b.full_mime_type(), "text/plain");
    }

    #[test]
    fn filename_falls_back_to_name_parameter() {
        let mut b = Body::new_leaf("application", "octet-stream");
        b.parameters.set("name", "report.pdf");
        assert_eq!(b.filename(), Some("report.pdf"));
    }

    #[test]
    fn filename_prefers_disposition_filename() {
        let mut b = Body::new_leaf("application", "octet-stream");
        b.parameters.set("name", "report.pdf");
        b.disposition_params.set("filename", "final.pdf");
        assert_eq!(b.filename(), Some("final.pdf"));
    }

    #[test]
    fn transfer_encoding_roundtrips_through_str() {
        for enc in [
            TransferEncoding::SevenBit,
            TransferEncoding::EightBit,
            TransferEncoding::Binary,
            TransferEncoding::QuotedPrintable,
            TransferEncoding::Base64,
        ] {
            assert_eq!(TransferEncoding::parse(enc.as_str()), enc);
        }
    }
}
