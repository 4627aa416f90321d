//! Tree-to-binary encoder
//!
//!     Two passes over the tree in document order. The first interns
//!     every tag name and attribute key, fixing the dictionary and with
//!     it the sentinel id. The second flattens the tree into pre-order
//!     node records; child counts carry the structure, so no end markers
//!     are needed.

use snx_parser::xml::Tree;

use super::dictionary::Dictionary;
use super::varint::write_varint;
use super::{MAGIC, VERSION};

/// Encode `tree` into the snxb wire form.
///
/// Only the normalized projection is written: whitespace-only text and
/// the declaration do not survive the trip.
pub(super) fn encode(tree: &Tree) -> Vec<u8> {
    let mut dict = Dictionary::new();
    for id in tree.descendants(tree.root()) {
        let node = tree.node(id);
        if !node.name.is_empty() {
            dict.intern(&node.name);
        }
        for attr in &node.attributes {
            dict.intern(&attr.key);
        }
    }
    // One past the last entry stands for the unnamed document root.
    let sentinel = dict.len() as u64;

    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    write_varint(&mut out, VERSION);
    write_varint(&mut out, dict.len() as u64);
    for entry in dict.entries() {
        write_string(&mut out, entry);
    }

    for id in tree.descendants(tree.root()) {
        let node = tree.node(id);
        if node.name.is_empty() {
            write_varint(&mut out, sentinel);
        } else {
            write_varint(&mut out, u64::from(dict.id_of(&node.name)));
        }
        write_varint(&mut out, node.attributes.len() as u64);
        for attr in &node.attributes {
            write_varint(&mut out, u64::from(dict.id_of(&attr.key)));
            write_string(&mut out, &attr.value);
        }
        write_varint(&mut out, node.children.len() as u64);
        match node.significant_text() {
            Some(text) => write_string(&mut out, text),
            None => write_varint(&mut out, 0),
        }
    }
    out
}

fn write_string(out: &mut Vec<u8>, value: &str) {
    write_varint(out, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
}
