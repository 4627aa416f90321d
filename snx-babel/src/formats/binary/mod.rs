//! Binary format implementation (snxb)
//!
//!     Dictionary-compressed wire form for document trees. All integers
//!     are unsigned LEB128 varints; strings are a byte-length varint
//!     followed by UTF-8 bytes.
//!
//!     ```text
//!     stream     := "SNXB" version:varint dictionary nodes
//!     dictionary := count:varint entry*        (tag names and attr keys,
//!                                               first-seen order)
//!     nodes      := record*                    (pre-order, child counts
//!                                               carry the structure)
//!     record     := tag_id:varint
//!                   attr_count:varint (key_id:varint value:string)*
//!                   child_count:varint
//!                   text:string                (empty = no text)
//!     ```
//!
//!     The first record describes the document itself and uses the
//!     sentinel tag id (one past the last dictionary entry) for the
//!     unnamed root. Whitespace-only text and the XML declaration are
//!     layout, not data, and are not written; decoding therefore yields
//!     the normalized projection of the encoded tree.

mod decoder;
mod dictionary;
mod encoder;
mod varint;

use crate::error::FormatError;
use crate::format::Format;
use snx_parser::xml::Tree;

const MAGIC: &[u8; 4] = b"SNXB";
const VERSION: u64 = 1;

/// Format implementation for the snxb binary codec
pub struct BinaryFormat;

impl Format for BinaryFormat {
    fn name(&self) -> &str {
        "snxb"
    }

    fn description(&self) -> &str {
        "Dictionary-compressed binary document format"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8]) -> Result<Tree, FormatError> {
        Ok(decoder::decode(source)?)
    }

    fn serialize(&self, tree: &Tree) -> Result<Vec<u8>, FormatError> {
        Ok(encoder::encode(tree))
    }
}
