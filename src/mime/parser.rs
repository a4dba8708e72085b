//! Parses wire bytes into an [`Email`] tree using `mail-parser`'s zero-copy
//! parser for the heavy RFC 822/MIME grammar, then rebuilds our own
//! arena-based tree and envelope from its output. Adapted from the host
//! application's envelope extractor, which does the same
//! `mail_parser::Message` → domain-type translation for its cache model.

use mail_parser::{Address as MpAddress, MessageParser, MimeHeaders, PartType};

use crate::config::ConfigView;
use crate::error::{ErrorKind, MailCoreResult};
use crate::mime::body::{Body, TransferEncoding};
use crate::mime::email::Email;
use crate::mime::envelope::Envelope;
use crate::primitives::address::{Address, AddressList};
use crate::raise_error;

fn encoding_from_part(part: &mail_parser::MessagePart) -> TransferEncoding {
    part.headers()
        .iter()
        .find(|h| h.name().eq_ignore_ascii_case("Content-Transfer-Encoding"))
        .and_then(|h| h.value().as_text())
        .map(TransferEncoding::parse)
        .unwrap_or(TransferEncoding::SevenBit)
}

/// Parses a complete RFC 822 message (headers + body) into an [`Email`].
/// `config.max_multipart_depth` bounds how deep the tree is walked back out
/// afterward by [`Email::walk`]; parsing itself accepts whatever
/// `mail-parser` accepts and the depth check applies at tree-consumption
/// time, not here.
pub fn parse_message(raw: &[u8], config: &ConfigView) -> MailCoreResult<Email> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| raise_error!("not a valid RFC 822 message".to_string(), ErrorKind::Parse))?;

    let mut email = Email::new();
    email.source = Some(raw.to_vec());
    email.envelope = extract_envelope(&parsed);

    for header in parsed.headers() {
        email
            .headers
            .push(header.name().to_string(), header.value().as_text().unwrap_or_default().to_string());
    }

    let root_idx = build_body_tree(&mut email, &parsed, 0, config.max_multipart_depth)?;
    email.set_root(root_idx);
    Ok(email)
}

fn extract_envelope(msg: &mail_parser::Message) -> Envelope {
    let mut env = Envelope::new();
    env.from = to_address_list(msg.from());
    env.to = to_address_list(msg.to());
    env.cc = to_address_list(msg.cc());
    env.bcc = to_address_list(msg.bcc());
    env.reply_to = to_address_list(msg.reply_to());
    env.subject = msg.subject().map(|s| s.to_string());
    env.message_id = msg.message_id().map(|s| format!("<{s}>"));
    env.in_reply_to = msg
        .in_reply_to()
        .as_text_list()
        .map(|ids| ids.iter().map(|s| format!("<{s}>")).collect())
        .unwrap_or_default();
    env.references = msg
        .references()
        .as_text_list()
        .map(|ids| ids.iter().map(|s| format!("<{s}>")).collect())
        .unwrap_or_default();
    if let Some(date) = msg.date() {
        let secs = date.to_timestamp();
        env.date = chrono::DateTime::from_timestamp(secs, 0);
    }
    env
}

fn to_address_list(addr: Option<&MpAddress>) -> AddressList {
    let mut list = AddressList::new();
    let Some(addr) = addr else {
        return list;
    };
    for a in addr.clone().into_list() {
        if let Some(email) = a.address() {
            list.push(Address {
                name: a.name().map(|n| n.to_string()),
                mailbox: email.to_string(),
            });
        }
    }
    list
}

fn build_body_tree(
    email: &mut Email,
    msg: &mail_parser::Message,
    part_id: usize,
    max_depth: usize,
) -> MailCoreResult<crate::mime::body::AttachIdx> {
    build_part(email, msg, part_id, 0, max_depth)
}

fn build_part(
    email: &mut Email,
    msg: &mail_parser::Message,
    part_id: usize,
    depth: usize,
    max_depth: usize,
) -> MailCoreResult<crate::mime::body::AttachIdx> {
    if depth > max_depth {
        return Err(raise_error!(
            "multipart nesting exceeds configured maximum depth".to_string(),
            ErrorKind::Parse
        ));
    }
    let part = msg
        .part(part_id.try_into().unwrap())
        .ok_or_else(|| raise_error!("referenced body part missing from parse tree".to_string(), ErrorKind::Parse))?;

    let content_type = part.content_type();
    let (ctype, csubtype) = content_type
        .map(|ct| (ct.ctype().to_string(), ct.subtype().unwrap_or("plain").to_string()))
        .unwrap_or_else(|| ("text".to_string(), "plain".to_string()));

    match &part.body {
        PartType::Multipart(children) => {
            let boundary = content_type
                .and_then(|ct| ct.attribute("boundary"))
                .unwrap_or("----")
                .to_string();
            let idx = email.insert(Body::new_multipart(csubtype, boundary));
            for &child_id in children {
                let child_idx = build_part(email, msg, child_id as usize, depth + 1, max_depth)?;
                email.attach_child(idx, child_idx)?;
            }
            Ok(idx)
        }
        PartType::Message(embedded) => {
            // An embedded message/rfc822 part carries its own complete header
            // set and body tree; we keep only the outer leaf here since the
            // arena doesn't nest whole `Email`s, matching `BodyKind::Leaf`
            // for content types this crate doesn't need to recurse into.
            let _ = embedded;
            Ok(email.insert(Body::new_leaf(ctype, csubtype)))
        }
        PartType::Text(_) | PartType::Html(_) | PartType::Binary(_) | PartType::InlineBinary(_) => {
            let mut body = Body::new_leaf(ctype, csubtype);
            body.encoding = encoding_from_part(part);
            if let Some(disposition) = part.content_disposition() {
                body.disposition = Some(disposition.ctype().to_string());
                for attr in disposition.attributes().unwrap_or(&[]) {
                    body.disposition_params.set(attr.name.as_ref(), attr.value.as_ref());
                }
            }
            if let Some(ct) = content_type {
                for attr in ct.attributes().unwrap_or(&[]) {
                    body.parameters.set(attr.name.as_ref(), attr.value.as_ref());
                }
            }
            Ok(email.insert(body))
        }
    }
}
