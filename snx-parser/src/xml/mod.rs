//! Main module for the XML engine's parse side

pub mod builder;
pub mod entities;
pub mod error;
pub mod loader;
pub mod token;
pub mod tokenizer;
pub mod tree;
pub mod validate;

pub use builder::{parse, parse_lenient, ParseOutcome, TreeBuilder};
pub use error::{ParseError, ParseErrorKind, TokenError, TokenErrorKind, XmlError};
pub use loader::{DocumentLoader, LoaderError};
pub use token::{Attribute, Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use tree::{Node, NodeId, Tree};
pub use validate::{CorrectionKind, CorrectionRecord};

/// How the parser reacts to anomalies.
///
/// The mode is threaded through the tokenizer and the builder; nothing
/// else branches on it. `Strict` turns every anomaly into an error with
/// the offset where it was detected. `Lenient` repairs what it can and
/// records each repair as a [`validate::CorrectionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParseMode {
    /// Fail on the first anomaly.
    Strict,
    /// Auto-correct and keep a record of every repair.
    Lenient,
}
