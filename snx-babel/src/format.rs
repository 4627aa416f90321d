//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing documents.

use crate::error::FormatError;
use snx_parser::xml::Tree;

/// Trait for document formats
///
/// Implementors provide conversion between a byte representation and the
/// document tree. Formats can support parsing, serialization, or both;
/// one-way formats (JSON export, for instance) simply leave the other
/// direction at its default.
///
/// The interface is byte-oriented rather than string-oriented because the
/// binary codec is not text. Text formats validate UTF-8 themselves and
/// report failures as [`FormatError::Encoding`].
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &[u8]) -> Result<Tree, FormatError> {
///         // Decode source into a Tree
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "xml", "json", "snxb")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Whether this format supports parsing (bytes → Tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Tree → bytes)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse input bytes into a Tree
    ///
    /// Default implementation returns NotSupported error.
    /// Formats that support parsing should override this method.
    fn parse(&self, _source: &[u8]) -> Result<Tree, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Tree into output bytes
    ///
    /// Default implementation returns NotSupported error.
    /// Formats that support serialization should override this method.
    fn serialize(&self, _tree: &Tree) -> Result<Vec<u8>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
