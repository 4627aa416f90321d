//! XML format implementation
//!
//! This module implements the Format trait for XML itself, treating XML
//! as just another format in the system. Parsing is strict: repair of
//! malformed documents is the verifier's job, not the converter's.

pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use snx_parser::xml::{parse, Tree};

use self::serializer::{SerializeOptions, XmlSerializer};

/// Format implementation for XML
///
/// One struct covers both registry entries: `xml` (pretty-printed) and
/// `xml-min` (minified). The entry name follows the options.
pub struct XmlFormat {
    options: SerializeOptions,
}

impl XmlFormat {
    /// Pretty-printing instance, registered as `xml`.
    pub fn pretty() -> Self {
        XmlFormat {
            options: SerializeOptions::default(),
        }
    }

    /// Minifying instance, registered as `xml-min`.
    pub fn minified() -> Self {
        XmlFormat {
            options: SerializeOptions::minified(),
        }
    }

    /// Instance with explicit serializer options.
    pub fn with_options(options: SerializeOptions) -> Self {
        XmlFormat { options }
    }
}

impl Format for XmlFormat {
    fn name(&self) -> &str {
        if self.options.indent {
            "xml"
        } else {
            "xml-min"
        }
    }

    fn description(&self) -> &str {
        if self.options.indent {
            "Pretty-printed XML document format"
        } else {
            "Minified XML document format"
        }
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8]) -> Result<Tree, FormatError> {
        let text = std::str::from_utf8(source)
            .map_err(|e| FormatError::Encoding(format!("input is not valid UTF-8: {}", e)))?;
        let tree = parse(text)?;
        Ok(tree)
    }

    fn serialize(&self, tree: &Tree) -> Result<Vec<u8>, FormatError> {
        let rendered = XmlSerializer::new(self.options.clone()).serialize(tree);
        Ok(rendered.into_bytes())
    }
}
