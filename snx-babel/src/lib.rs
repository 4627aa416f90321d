//! Output formats for snx document trees
//!
//!     This crate is the serialization side of the engine: everything that
//!     turns a parsed [`snx_parser::xml::Tree`] into bytes, and the two
//!     byte shapes that turn back into trees.
//!
//! Architecture
//!
//!     - Format trait: uniform byte-level interface (parsing and/or
//!       serialization) for every output shape
//!     - FormatRegistry: discovery and selection by name
//!     - Format implementations: pretty XML, minified XML, the snxb
//!       binary codec, and the JSON export
//!
//!     This is a pure lib: it powers snx-cli but stays shell agnostic.
//!     No std printing, no env vars, no path handling in here.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── xml                 # pretty and minified text serialization
//!     │   ├── binary              # dictionary + varint codec (snxb)
//!     │   └── json                # structural JSON export (one-way)
//!     └── lib.rs
//!
//! Round-trip contract
//!
//!     Pretty and minified XML re-parse to the same tree modulo the
//!     whitespace-insignificance rule (layout whitespace is replaced, not
//!     preserved). The binary codec round-trips exactly on normalized
//!     trees. JSON stays one-way: the `@attributes`/`@text` object shape
//!     does not carry enough to rebuild a document losslessly.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use error::{CodecError, CodecErrorKind, FormatError};
pub use format::Format;
pub use formats::binary::BinaryFormat;
pub use formats::json::{export_value, JsonFormat};
pub use formats::xml::serializer::{SerializeOptions, XmlSerializer};
pub use formats::xml::XmlFormat;
pub use registry::FormatRegistry;
