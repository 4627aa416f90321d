//! Error types for the parse pipeline
//!
//!     Every failure is a closed enum plus the byte offset where it was
//!     detected, so callers can match on the kind instead of parsing a
//!     message. The `detail` string exists for reporting only; it never
//!     carries information a caller is expected to branch on.
//!
//!     The split mirrors the pipeline stages: `TokenError` for lexical
//!     failures, `ParseError` for structural ones (strict mode only),
//!     and `XmlError` as the umbrella the entry points return.

use std::fmt;

/// The closed set of lexical failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenErrorKind {
    /// A construct started but never finished before end of input:
    /// an unclosed tag, quote, comment, or declaration.
    Unterminated,
    /// An entity reference that is not one of the recognized forms.
    UnknownEntity,
}

/// A lexical failure with the byte offset of the offending construct.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TokenError {
    pub kind: TokenErrorKind,
    /// Byte offset of the construct's start.
    pub offset: usize,
    /// Human-readable context for reports; not part of the contract.
    pub detail: String,
}

impl TokenError {
    pub fn new(kind: TokenErrorKind, offset: usize, detail: impl Into<String>) -> Self {
        TokenError {
            kind,
            offset,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenErrorKind::Unterminated => {
                write!(f, "unterminated construct at byte {}: {}", self.offset, self.detail)
            }
            TokenErrorKind::UnknownEntity => {
                write!(f, "unknown entity at byte {}: {}", self.offset, self.detail)
            }
        }
    }
}

impl std::error::Error for TokenError {}

/// The closed set of structural failures (strict mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParseErrorKind {
    /// A token that cannot be accepted in the current state: a close tag
    /// with nothing matching on the stack, a second top-level element,
    /// text outside any element, a duplicated attribute key, or end of
    /// input while elements are still open.
    UnexpectedToken,
    /// The document contains no element at all.
    EmptyDocument,
}

/// A structural failure with the byte offset of the offending token.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    /// Human-readable context for reports; not part of the contract.
    pub detail: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize, detail: impl Into<String>) -> Self {
        ParseError {
            kind,
            offset,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::UnexpectedToken => {
                write!(f, "unexpected token at byte {}: {}", self.offset, self.detail)
            }
            ParseErrorKind::EmptyDocument => write!(f, "document contains no elements"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Umbrella error returned by the parse entry points.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum XmlError {
    /// Lexical failure from the tokenizer
    Token(TokenError),
    /// Structural failure from the builder (strict mode)
    Parse(ParseError),
}

impl XmlError {
    /// Byte offset where the failure was detected.
    pub fn offset(&self) -> usize {
        match self {
            XmlError::Token(err) => err.offset,
            XmlError::Parse(err) => err.offset,
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Token(err) => write!(f, "tokenize error: {}", err),
            XmlError::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for XmlError {}

impl From<TokenError> for XmlError {
    fn from(err: TokenError) -> Self {
        XmlError::Token(err)
    }
}

impl From<ParseError> for XmlError {
    fn from(err: ParseError) -> Self {
        XmlError::Parse(err)
    }
}
