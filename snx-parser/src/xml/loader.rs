//! Document loading utilities
//!
//! This module provides `DocumentLoader` - a utility for reading source text
//! from files or strings and running the parse pipeline on it. This is used
//! by both production code and tests.
//!
//! # Example
//!
//! ```rust
//! use snx_parser::xml::loader::DocumentLoader;
//!
//! // From file
//! let tree = DocumentLoader::from_path("users.xml").unwrap().parse().unwrap();
//!
//! // From string
//! let outcome = DocumentLoader::from_string("<users/>").parse_lenient().unwrap();
//! ```

use std::fs;
use std::path::Path;

use super::builder::{parse, parse_lenient, ParseOutcome};
use super::error::XmlError;
use super::token::Token;
use super::tokenizer::Tokenizer;
use super::tree::Tree;
use super::ParseMode;

/// Error that can occur when loading documents
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading the file
    Io(String),
    /// Parse pipeline error
    Xml(XmlError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::Io(msg) => write!(f, "IO error: {}", msg),
            LoaderError::Xml(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io(err.to_string())
    }
}

impl From<XmlError> for LoaderError {
    fn from(err: XmlError) -> Self {
        LoaderError::Xml(err)
    }
}

/// Loads a document into memory and runs the parse pipeline on it.
///
/// The engine itself only ever sees in-memory buffers; this is the one
/// place the parse side touches the filesystem, so the CLI and tests can
/// go from a path to a tree in one call.
#[derive(Debug)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Read the document at `path` into memory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader { source })
    }

    /// Wrap an in-memory document.
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Strict parse.
    pub fn parse(&self) -> Result<Tree, LoaderError> {
        Ok(parse(&self.source)?)
    }

    /// Lenient parse: tree plus correction records.
    pub fn parse_lenient(&self) -> Result<ParseOutcome, LoaderError> {
        Ok(parse_lenient(&self.source)?)
    }

    /// Tokenize without building a tree.
    pub fn tokenize(&self, mode: ParseMode) -> Result<Vec<Token>, LoaderError> {
        let tokens = Tokenizer::new(&self.source, mode)
            .collect::<Result<Vec<_>, _>>()
            .map_err(XmlError::from)?;
        Ok(tokens)
    }
}
