//! A complete parsed or composed message: envelope, raw headers, and a MIME
//! body tree stored in a flat arena addressed by [`AttachIdx`].

use crate::error::{ErrorKind, MailCoreResult};
use crate::mime::body::{AttachIdx, Body, BodyKind};
use crate::mime::envelope::Envelope;
use crate::primitives::headers::HeaderList;
use crate::raise_error;

#[derive(Debug, Clone)]
pub struct Email {
    pub envelope: Envelope,
    pub headers: HeaderList,
    arena: Vec<Body>,
    root: Option<AttachIdx>,
    /// The original wire bytes this tree was parsed from, if any. `Body`
    /// spans are only meaningful against this buffer.
    pub source: Option<Vec<u8>>,
}

impl Email {
    pub fn new() -> Self {
        Self {
            envelope: Envelope::new(),
            headers: HeaderList::new(),
            arena: Vec::new(),
            root: None,
            source: None,
        }
    }

    /// Inserts `body` into the arena and returns its stable handle. The
    /// caller links it into a parent's children (or sets it as root)
    /// separately — insertion alone never mutates tree structure.
    pub fn insert(&mut self, body: Body) -> AttachIdx {
        let idx = AttachIdx(self.arena.len() as u32);
        self.arena.push(body);
        idx
    }

    pub fn get(&self, idx: AttachIdx) -> Option<&Body> {
        self.arena.get(idx.0 as usize)
    }

    pub fn get_mut(&mut self, idx: AttachIdx) -> Option<&mut Body> {
        self.arena.get_mut(idx.0 as usize)
    }

    pub fn root(&self) -> Option<AttachIdx> {
        self.root
    }

    pub fn set_root(&mut self, idx: AttachIdx) {
        self.root = Some(idx);
    }

    /// Appends `child` to a multipart parent's child list. Errors if
    /// `parent` is not a multipart node — attaching to a leaf or an
    /// embedded-message node is always a caller bug, not a runtime case.
    pub fn attach_child(&mut self, parent: AttachIdx, child: AttachIdx) -> MailCoreResult<()> {
        let parent_body = self
            .arena
            .get_mut(parent.0 as usize)
            .ok_or_else(|| raise_error!("parent attach index out of range".to_string(), ErrorKind::Parse))?;
        match &mut parent_body.kind {
            BodyKind::Multipart { children, .. } => {
                children.push(child);
                Ok(())
            }
            _ => Err(raise_error!(
                "cannot attach a child to a non-multipart body".to_string(),
                ErrorKind::Parse
            )),
        }
    }

    /// Depth-first pre-order walk of the tree starting at `root`, yielding
    /// every node's handle exactly once. Used by the writer and by
    /// attachment enumeration; bounded by `max_depth` (`ConfigView`) so a
    /// malicious or corrupt multipart nest can't blow the stack.
    pub fn walk(&self, max_depth: usize) -> MailCoreResult<Vec<AttachIdx>> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.walk_inner(root, 0, max_depth, &mut out)?;
        }
        Ok(out)
    }

    fn walk_inner(
        &self,
        idx: AttachIdx,
        depth: usize,
        max_depth: usize,
        out: &mut Vec<AttachIdx>,
    ) -> MailCoreResult<()> {
        if depth > max_depth {
            return Err(raise_error!(
                "multipart nesting exceeds configured maximum depth".to_string(),
                ErrorKind::Parse
            ));
        }
        out.push(idx);
        let body = self
            .get(idx)
            .ok_or_else(|| raise_error!("dangling attach index during walk".to_string(), ErrorKind::Parse))?;
        match &body.kind {
            BodyKind::Leaf => {}
            BodyKind::Multipart { children, .. } => {
                for &child in children {
                    self.walk_inner(child, depth + 1, max_depth, out)?;
                }
            }
            BodyKind::EmbeddedMessage { child } => {
                self.walk_inner(*child, depth + 1, max_depth, out)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_child_links_multipart_parent() {
        let mut email = Email::new();
        let parent = email.insert(Body::new_multipart("mixed", "BOUND"));
        let child = email.insert(Body::new_leaf("text", "plain"));
        email.set_root(parent);
        email.attach_child(parent, child).unwrap();
        let walked = email.walk(30).unwrap();
        assert_eq!(walked, vec![parent, child]);
    }

    #[test]
    fn attach_child_rejects_leaf_parent() {
        let mut email = Email::new();
        let leaf = email.insert(Body::new_leaf("text", "plain"));
        let other = email.insert(Body::new_leaf("text", "plain"));
        assert!(email.attach_child(leaf, other).is_err());
    }

    #[test]
    fn walk_detects_excessive_nesting() {
        let mut email = Email::new();
        let mut parent = email.insert(Body::new_multipart("mixed", "B0"));
        email.set_root(parent);
        for i in 0..5 {
            let child = email.insert(Body::new_multipart("mixed", format!("B{i}")));
            email.attach_child(parent, child).unwrap();
            parent = child;
        }
        assert!(email.walk(2).is_err());
        assert!(email.walk(10).is_ok());
    }
}
