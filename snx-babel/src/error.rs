//! Error types for format conversion
//!
//!     `CodecError` carries the binary codec's closed failure set with the
//!     byte offset where decoding stopped. `FormatError` is the umbrella
//!     every `Format` method returns.

use std::fmt;

use snx_parser::xml::XmlError;

/// The closed set of binary-codec failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CodecErrorKind {
    /// The stream does not start with the snxb marker.
    BadMagic,
    /// The stream's format version is newer than this build understands.
    UnsupportedVersion,
    /// The stream ends in the middle of a field.
    Truncated,
    /// A tag or attribute-key id beyond the dictionary (the sentinel id
    /// is only valid for the document record).
    UnknownId,
    /// A declared length or count is inconsistent with the stream:
    /// overlong varint, length overrunning the input, non-UTF-8 entry,
    /// trailing bytes.
    SizeMismatch,
}

/// A decode failure: what went wrong and where in the stream.
///
/// Decoding never exposes a partial tree; on error the caller gets this
/// and nothing else.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodecError {
    pub kind: CodecErrorKind,
    /// Byte offset into the compressed stream.
    pub offset: usize,
    pub detail: String,
}

impl CodecError {
    pub fn new(kind: CodecErrorKind, offset: usize, detail: impl Into<String>) -> Self {
        CodecError {
            kind,
            offset,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            CodecErrorKind::BadMagic => "bad magic",
            CodecErrorKind::UnsupportedVersion => "unsupported version",
            CodecErrorKind::Truncated => "truncated stream",
            CodecErrorKind::UnknownId => "unknown dictionary id",
            CodecErrorKind::SizeMismatch => "size mismatch",
        };
        write!(f, "{} at byte {}: {}", label, self.offset, self.detail)
    }
}

impl std::error::Error for CodecError {}

/// Error that can occur when converting through a format
#[derive(Debug, Clone)]
pub enum FormatError {
    /// No format registered under the requested name
    FormatNotFound(String),
    /// The format does not implement the requested direction
    NotSupported(String),
    /// The input is not valid UTF-8 for a text format
    Encoding(String),
    /// Parse pipeline failure
    Parse(XmlError),
    /// Binary codec failure
    Codec(CodecError),
    /// Serialization failure
    Serialize(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "format '{}' not found", name),
            FormatError::NotSupported(msg) => write!(f, "{}", msg),
            FormatError::Encoding(msg) => write!(f, "encoding error: {}", msg),
            FormatError::Parse(err) => write!(f, "{}", err),
            FormatError::Codec(err) => write!(f, "codec error: {}", err),
            FormatError::Serialize(msg) => write!(f, "serialize error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<XmlError> for FormatError {
    fn from(err: XmlError) -> Self {
        FormatError::Parse(err)
    }
}

impl From<CodecError> for FormatError {
    fn from(err: CodecError) -> Self {
        FormatError::Codec(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_error_display_names_kind_and_offset() {
        let err = CodecError::new(CodecErrorKind::Truncated, 12, "varint runs past end");
        assert_eq!(err.to_string(), "truncated stream at byte 12: varint runs past end");
    }

    #[test]
    fn format_error_wraps_both_pipelines() {
        let codec: FormatError = CodecError::new(CodecErrorKind::BadMagic, 0, "x").into();
        assert!(matches!(codec, FormatError::Codec(_)));
        assert!(codec.to_string().contains("bad magic"));

        let not_found = FormatError::FormatNotFound("yaml".into());
        assert_eq!(not_found.to_string(), "format 'yaml' not found");
    }
}
