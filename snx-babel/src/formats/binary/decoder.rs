//! Binary-to-tree decoder
//!
//!     Strict by construction: every count, length and id is checked as
//!     it is read, and a failed stream yields a [`CodecError`] instead of
//!     a partial tree. The node stream is rebuilt with an explicit
//!     (parent, remaining-children) stack, so stream nesting depth cannot
//!     overflow the call stack. Nodes are allocated in record order,
//!     which is the same pre-order the encoder walks; decoded trees
//!     therefore compare equal to the normalized original, ids included.

use snx_parser::xml::{Attribute, NodeId, Tree};

use super::dictionary::Dictionary;
use super::varint::read_varint;
use super::{MAGIC, VERSION};
use crate::error::{CodecError, CodecErrorKind};

pub(super) fn decode(input: &[u8]) -> Result<Tree, CodecError> {
    if input.len() < MAGIC.len() || &input[..MAGIC.len()] != MAGIC {
        return Err(CodecError::new(
            CodecErrorKind::BadMagic,
            0,
            "input does not start with the snxb marker",
        ));
    }
    let mut pos = MAGIC.len();

    let version_offset = pos;
    let version = read_varint(input, &mut pos)?;
    if version != VERSION {
        return Err(CodecError::new(
            CodecErrorKind::UnsupportedVersion,
            version_offset,
            format!(
                "stream version {} (this build reads version {})",
                version, VERSION
            ),
        ));
    }

    let dict_count = read_varint(input, &mut pos)?;
    let mut entries = Vec::new();
    for _ in 0..dict_count {
        entries.push(read_string(input, &mut pos)?);
    }
    let dict = Dictionary::from_entries(entries);
    let sentinel = dict.len() as u64;

    let mut tree = Tree::new();
    let root = tree.root();

    // The document record. Streams written by the encoder always open
    // with the sentinel; a named first record is accepted as a bare
    // single-element document.
    let first_offset = pos;
    let tag_id = read_varint(input, &mut pos)?;
    let first = if tag_id == sentinel {
        root
    } else {
        let name = dict.resolve(tag_id, first_offset)?.to_string();
        log::debug!(target: "snx.codec", "named first record <{name}>, reading as a bare element document");
        tree.append_element(root, name, Vec::new())
    };
    let mut stack: Vec<(NodeId, u64)> = Vec::new();
    let child_count = read_node_body(input, &mut pos, &dict, &mut tree, first)?;
    if child_count > 0 {
        stack.push((first, child_count));
    }

    while let Some(&(parent, remaining)) = stack.last() {
        if remaining == 0 {
            stack.pop();
            continue;
        }
        let top = stack.len() - 1;
        stack[top].1 = remaining - 1;

        let record_offset = pos;
        let tag_id = read_varint(input, &mut pos)?;
        let name = dict.resolve(tag_id, record_offset)?.to_string();
        let id = tree.append_element(parent, name, Vec::new());
        let child_count = read_node_body(input, &mut pos, &dict, &mut tree, id)?;
        if child_count > 0 {
            stack.push((id, child_count));
        }
    }

    if pos != input.len() {
        return Err(CodecError::new(
            CodecErrorKind::SizeMismatch,
            pos,
            format!("{} trailing bytes after the node stream", input.len() - pos),
        ));
    }
    Ok(tree)
}

/// Read the attribute list, child count and text of one record, applying
/// them to `id`. Returns the child count; the caller owns the stack.
fn read_node_body(
    input: &[u8],
    pos: &mut usize,
    dict: &Dictionary,
    tree: &mut Tree,
    id: NodeId,
) -> Result<u64, CodecError> {
    let attr_count = read_varint(input, pos)?;
    for _ in 0..attr_count {
        let key_offset = *pos;
        let key_id = read_varint(input, pos)?;
        let key = dict.resolve(key_id, key_offset)?.to_string();
        let value = read_string(input, pos)?;
        tree.node_mut(id).attributes.push(Attribute::new(key, value));
    }
    let child_count = read_varint(input, pos)?;
    let text = read_string(input, pos)?;
    if !text.is_empty() {
        tree.append_text(id, &text);
    }
    Ok(child_count)
}

/// Length-prefixed UTF-8 string. A zero length yields the empty string.
fn read_string(input: &[u8], pos: &mut usize) -> Result<String, CodecError> {
    let len_offset = *pos;
    let len = read_varint(input, pos)?;
    let remaining = (input.len() - *pos) as u64;
    if len > remaining {
        return Err(CodecError::new(
            CodecErrorKind::Truncated,
            len_offset,
            "string payload runs past end of input",
        ));
    }
    let len = len as usize;
    let bytes = &input[*pos..*pos + len];
    match std::str::from_utf8(bytes) {
        Ok(s) => {
            let s = s.to_string();
            *pos += len;
            Ok(s)
        }
        Err(_) => Err(CodecError::new(
            CodecErrorKind::SizeMismatch,
            *pos,
            "string payload is not valid UTF-8",
        )),
    }
}
