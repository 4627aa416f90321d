//! Token types produced by the tokenizer
//!
//!     A token is immutable once produced: the kind with its payload, the
//!     raw lexeme as it appeared in the source, and the byte offset of the
//!     lexeme's first byte. The builder consumes the kinds; the raw lexeme
//!     and offset exist for error reports and tooling.
//!
//!     Attribute duplicates survive tokenization on purpose. The tokenizer
//!     reports what the source says; deciding what a duplicate key means
//!     is the validator's job.

use std::fmt;

/// One `key="value"` pair, in source order.
///
/// The value is entity-decoded. A key written without a value (`<a checked>`)
/// carries an empty string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The closed set of token kinds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    /// `<name attr="v">`
    OpenTag {
        name: String,
        attributes: Vec<Attribute>,
    },
    /// `</name>`
    CloseTag { name: String },
    /// `<name attr="v"/>`
    SelfClosingTag {
        name: String,
        attributes: Vec<Attribute>,
    },
    /// A raw character run between tags, entity-decoded.
    Text { content: String },
    /// `<!--...-->`; lexical trivia, dropped by the builder.
    Comment { content: String },
    /// `<?...?>` (and `<!...>` markup declarations, which share the shape
    /// of "non-element markup scanned to its terminator").
    Declaration { content: String },
}

/// A single token: kind, raw lexeme, byte offset of the lexeme start.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The source bytes this token was produced from, verbatim.
    pub raw: String,
    /// Byte offset of the first byte of `raw` in the source.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            raw: raw.into(),
            offset,
        }
    }

    /// Tag name for the tag-bearing kinds, `None` otherwise.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::OpenTag { name, .. }
            | TokenKind::CloseTag { name }
            | TokenKind::SelfClosingTag { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::OpenTag { name, .. } => write!(f, "open tag <{}>", name),
            TokenKind::CloseTag { name } => write!(f, "close tag </{}>", name),
            TokenKind::SelfClosingTag { name, .. } => write!(f, "self-closing tag <{}/>", name),
            TokenKind::Text { .. } => write!(f, "text"),
            TokenKind::Comment { .. } => write!(f, "comment"),
            TokenKind::Declaration { .. } => write!(f, "declaration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_covers_tag_kinds_only() {
        let open = Token::new(
            TokenKind::OpenTag {
                name: "user".into(),
                attributes: vec![],
            },
            "<user>",
            0,
        );
        assert_eq!(open.tag_name(), Some("user"));

        let text = Token::new(TokenKind::Text { content: "hi".into() }, "hi", 6);
        assert_eq!(text.tag_name(), None);
    }

    #[test]
    fn display_names_the_tag() {
        let close = Token::new(TokenKind::CloseTag { name: "post".into() }, "</post>", 3);
        assert_eq!(close.to_string(), "close tag </post>");
    }
}
