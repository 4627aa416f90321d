//! Hand-written XML tokenizer
//!
//!     A byte-cursor scanner over a complete UTF-8 buffer. The grammar is
//!     context-dependent (what `/` means depends on whether we are inside
//!     a tag), which is why this is a hand-rolled state scanner and not a
//!     generated lexer.
//!
//!     The tokenizer is lazy and finite: it implements `Iterator` and
//!     yields one `Result<Token, TokenError>` per construct. It is a pure
//!     function of its input; a fresh `Tokenizer` over the same source
//!     yields the same sequence. After yielding an error it fuses and
//!     yields nothing further.
//!
//!     Scanning rules:
//!     - `<?...?>` and `<!...>` become Declaration tokens
//!     - `<!--...-->` becomes a Comment token
//!     - `<name ...>` / `</name>` / `<name .../>` become the tag tokens
//!     - anything else becomes Text, entity-decoded
//!
//!     Tag and attribute names are ASCII `[A-Za-z_:]` followed by
//!     `[A-Za-z0-9_.:-]`, case preserved. Attribute values may be single-
//!     or double-quoted (entity-decoded), or unquoted up to the next
//!     whitespace or `>`; a key without `=` carries an empty value. A
//!     close tag with an empty name (`</>`) is emitted as written; sorting
//!     that out is the builder's job, not a lexical failure.
//!
//!     All slice endpoints land on ASCII structural bytes, so slicing the
//!     UTF-8 source stays on char boundaries throughout.

use memchr::memchr;

use super::entities::decode_entities;
use super::error::{TokenError, TokenErrorKind};
use super::token::{Attribute, Token, TokenKind};
use super::ParseMode;

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b':'
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-')
}

/// Streaming tokenizer over a source buffer.
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
    mode: ParseMode,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str, mode: ParseMode) -> Self {
        Tokenizer {
            source,
            pos: 0,
            mode,
            done: false,
        }
    }

    /// The buffer this tokenizer scans.
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn unterminated(&mut self, offset: usize, detail: String) -> Result<Token, TokenError> {
        self.done = true;
        Err(TokenError::new(
            TokenErrorKind::Unterminated,
            offset,
            detail,
        ))
    }

    fn next_token(&mut self) -> Option<Result<Token, TokenError>> {
        if self.done || self.pos >= self.source.len() {
            self.done = true;
            return None;
        }
        let bytes = self.source.as_bytes();
        let start = self.pos;

        if bytes[start] != b'<' {
            // Text run up to the next '<' (or end of input).
            let end = memchr(b'<', &bytes[start..])
                .map(|rel| start + rel)
                .unwrap_or(bytes.len());
            let raw = &self.source[start..end];
            self.pos = end;
            return match decode_entities(raw, start, self.mode) {
                Ok(content) => Some(Ok(Token::new(TokenKind::Text { content }, raw, start))),
                Err(err) => {
                    self.done = true;
                    Some(Err(err))
                }
            };
        }

        let rest = &self.source[start..];
        if rest.starts_with("<!--") {
            return Some(match rest[4..].find("-->") {
                Some(rel) => {
                    let content = &rest[4..4 + rel];
                    let end = start + 4 + rel + 3;
                    self.pos = end;
                    Ok(Token::new(
                        TokenKind::Comment {
                            content: content.to_string(),
                        },
                        &self.source[start..end],
                        start,
                    ))
                }
                None => self.unterminated(start, "comment `<!--` never closed".to_string()),
            });
        }
        if rest.starts_with("<?") {
            return Some(match rest[2..].find("?>") {
                Some(rel) => {
                    let content = &rest[2..2 + rel];
                    let end = start + 2 + rel + 2;
                    self.pos = end;
                    Ok(Token::new(
                        TokenKind::Declaration {
                            content: content.to_string(),
                        },
                        &self.source[start..end],
                        start,
                    ))
                }
                None => self.unterminated(start, "declaration `<?` never closed".to_string()),
            });
        }
        if rest.starts_with("<!") {
            // Markup declarations (DOCTYPE and friends): scanned to '>'.
            return Some(match memchr(b'>', &bytes[start + 2..]) {
                Some(rel) => {
                    let end = start + 2 + rel + 1;
                    let content = &self.source[start + 2..end - 1];
                    self.pos = end;
                    Ok(Token::new(
                        TokenKind::Declaration {
                            content: content.to_string(),
                        },
                        &self.source[start..end],
                        start,
                    ))
                }
                None => self.unterminated(start, "markup declaration `<!` never closed".to_string()),
            });
        }
        if rest.starts_with("</") {
            return Some(self.scan_close_tag(start));
        }
        Some(self.scan_open_tag(start))
    }

    fn scan_close_tag(&mut self, start: usize) -> Result<Token, TokenError> {
        let bytes = self.source.as_bytes();
        let name_start = start + 2;
        let mut j = name_start;
        while j < bytes.len() && is_name_byte(bytes[j]) {
            j += 1;
        }
        let name = self.source[name_start..j].to_string();
        // Tolerate trailing junk before '>'; the name is already fixed.
        while j < bytes.len() && bytes[j] != b'>' {
            j += 1;
        }
        if j >= bytes.len() {
            return self.unterminated(start, format!("close tag `</{}` never closed", name));
        }
        j += 1;
        self.pos = j;
        Ok(Token::new(
            TokenKind::CloseTag { name },
            &self.source[start..j],
            start,
        ))
    }

    fn scan_open_tag(&mut self, start: usize) -> Result<Token, TokenError> {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        let name_start = start + 1;

        if name_start >= len || !is_name_start(bytes[name_start]) {
            // A '<' that begins no recognizable construct. There is no tag
            // here to recover into, so the construct never terminates.
            return self.unterminated(start, "stray `<` does not begin markup".to_string());
        }
        let mut j = name_start + 1;
        while j < len && is_name_byte(bytes[j]) {
            j += 1;
        }
        let name = self.source[name_start..j].to_string();

        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;
        loop {
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= len {
                return self.unterminated(start, format!("tag `<{}` never closed", name));
            }
            if bytes[j] == b'>' {
                j += 1;
                break;
            }
            if bytes[j] == b'/' {
                if j + 1 < len && bytes[j + 1] == b'>' {
                    self_closing = true;
                    j += 2;
                    break;
                }
                j += 1;
                continue;
            }

            let key_start = j;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            if key_start == j {
                // Junk byte inside the tag; skip it rather than loop forever.
                j += 1;
                continue;
            }
            let key = self.source[key_start..j].to_string();

            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            let value = if j < len && bytes[j] == b'=' {
                j += 1;
                while j < len && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < len && (bytes[j] == b'"' || bytes[j] == b'\'') {
                    let quote = bytes[j];
                    j += 1;
                    let value_start = j;
                    while j < len && bytes[j] != quote {
                        j += 1;
                    }
                    if j >= len {
                        return self.unterminated(
                            start,
                            format!("attribute `{}` of `<{}` has an unclosed quote", key, name),
                        );
                    }
                    let raw_value = &self.source[value_start..j];
                    j += 1;
                    match decode_entities(raw_value, value_start, self.mode) {
                        Ok(value) => value,
                        Err(err) => {
                            self.done = true;
                            return Err(err);
                        }
                    }
                } else {
                    // Unquoted value: up to whitespace, '>' or '/>'.
                    let value_start = j;
                    while j < len && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                        if bytes[j] == b'/' && j + 1 < len && bytes[j + 1] == b'>' {
                            break;
                        }
                        j += 1;
                    }
                    self.source[value_start..j].to_string()
                }
            } else {
                String::new()
            };
            attributes.push(Attribute { key, value });
        }

        self.pos = j;
        let raw = &self.source[start..j];
        let kind = if self_closing {
            TokenKind::SelfClosingTag { name, attributes }
        } else {
            TokenKind::OpenTag { name, attributes }
        };
        Ok(Token::new(kind, raw, start))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, TokenError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.next_token();
        if let Some(token) = &item {
            log::trace!(target: "snx.tokenizer", "emit: {token:?}");
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Tokenizer::new(source, ParseMode::Strict)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokens(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_open_text_close() {
        let toks = tokens("<id>42</id>");
        assert_eq!(toks.len(), 3);
        assert_eq!(
            toks[0].kind,
            TokenKind::OpenTag {
                name: "id".into(),
                attributes: vec![],
            }
        );
        assert_eq!(toks[0].raw, "<id>");
        assert_eq!(toks[0].offset, 0);
        assert_eq!(toks[1].kind, TokenKind::Text { content: "42".into() });
        assert_eq!(toks[1].offset, 4);
        assert_eq!(toks[2].kind, TokenKind::CloseTag { name: "id".into() });
        assert_eq!(toks[2].offset, 6);
    }

    #[test]
    fn scans_attributes_in_source_order() {
        let toks = tokens(r#"<user id="1" name='grace'>"#);
        match &toks[0].kind {
            TokenKind::OpenTag { name, attributes } => {
                assert_eq!(name, "user");
                assert_eq!(
                    attributes,
                    &vec![
                        Attribute::new("id", "1"),
                        Attribute::new("name", "grace"),
                    ]
                );
            }
            other => panic!("expected open tag, got {other:?}"),
        }
    }

    #[test]
    fn keeps_duplicate_attributes_at_this_stage() {
        let toks = tokens(r#"<user id="1" id="2">"#);
        match &toks[0].kind {
            TokenKind::OpenTag { attributes, .. } => {
                assert_eq!(attributes.len(), 2);
                assert_eq!(attributes[1], Attribute::new("id", "2"));
            }
            other => panic!("expected open tag, got {other:?}"),
        }
    }

    #[test]
    fn scans_self_closing_and_valueless_attributes() {
        let toks = tokens(r#"<friend user_id="7"/><flag set>"#);
        assert_eq!(
            toks[0].kind,
            TokenKind::SelfClosingTag {
                name: "friend".into(),
                attributes: vec![Attribute::new("user_id", "7")],
            }
        );
        assert_eq!(
            toks[1].kind,
            TokenKind::OpenTag {
                name: "flag".into(),
                attributes: vec![Attribute::new("set", "")],
            }
        );
    }

    #[test]
    fn scans_declaration_comment_doctype() {
        let toks = kinds("<?xml version=\"1.0\"?><!-- hi --><!DOCTYPE users><users></users>");
        assert_eq!(
            toks[0],
            TokenKind::Declaration {
                content: "xml version=\"1.0\"".into(),
            }
        );
        assert_eq!(toks[1], TokenKind::Comment { content: " hi ".into() });
        assert_eq!(
            toks[2],
            TokenKind::Declaration {
                content: "DOCTYPE users".into(),
            }
        );
        assert_eq!(
            toks[3],
            TokenKind::OpenTag {
                name: "users".into(),
                attributes: vec![],
            }
        );
    }

    #[test]
    fn decodes_entities_in_text_and_attribute_values() {
        let toks = tokens(r#"<post caption="a &amp; b">x &lt; y</post>"#);
        match &toks[0].kind {
            TokenKind::OpenTag { attributes, .. } => {
                assert_eq!(attributes[0].value, "a & b");
            }
            other => panic!("expected open tag, got {other:?}"),
        }
        assert_eq!(toks[1].kind, TokenKind::Text { content: "x < y".into() });
    }

    #[test]
    fn whitespace_runs_are_text_tokens() {
        let toks = kinds("<a>\n  <b/>\n</a>");
        assert!(matches!(&toks[1], TokenKind::Text { content } if content == "\n  "));
        assert!(matches!(&toks[3], TokenKind::Text { content } if content == "\n"));
    }

    #[test]
    fn unterminated_tag_fails_at_the_tag_start() {
        let err = Tokenizer::new("<users><user id=\"1\"", ParseMode::Strict)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.kind, TokenErrorKind::Unterminated);
        assert_eq!(err.offset, 7);
        assert!(err.detail.contains("<user"));
    }

    #[test]
    fn unterminated_quote_comment_declaration_all_fail() {
        for (source, at) in [
            (r#"<user name="grace>"#, 0),
            ("<!-- never closed", 0),
            ("<?xml version=\"1.0\"", 0),
            ("<a><!DOCTYPE", 3),
        ] {
            let err = Tokenizer::new(source, ParseMode::Strict)
                .collect::<Result<Vec<_>, _>>()
                .unwrap_err();
            assert_eq!(err.kind, TokenErrorKind::Unterminated, "source: {source}");
            assert_eq!(err.offset, at, "source: {source}");
        }
    }

    #[test]
    fn stray_angle_bracket_is_unterminated() {
        let err = Tokenizer::new("a < b", ParseMode::Strict)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.kind, TokenErrorKind::Unterminated);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn unknown_entity_strict_vs_lenient() {
        let err = Tokenizer::new("<a>&foo;</a>", ParseMode::Strict)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.kind, TokenErrorKind::UnknownEntity);
        assert_eq!(err.offset, 3);

        let toks = Tokenizer::new("<a>&foo;</a>", ParseMode::Lenient)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(toks[1].kind, TokenKind::Text { content: "&foo;".into() });
    }

    #[test]
    fn empty_close_tag_is_lexically_fine() {
        let toks = tokens("<a></>");
        assert_eq!(toks[1].kind, TokenKind::CloseTag { name: "".into() });
    }

    #[test]
    fn fuses_after_an_error() {
        let mut tokenizer = Tokenizer::new("a < b", ParseMode::Strict);
        assert!(matches!(tokenizer.next(), Some(Ok(_))));
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn rescanning_yields_the_same_sequence() {
        let source = "<users><user id=\"1\"><name>Ada</name></user></users>";
        let first = tokens(source);
        let second = tokens(source);
        assert_eq!(first, second);
    }

    #[test]
    fn utf8_text_survives_scanning() {
        let toks = tokens("<name>Zoë 😄</name>");
        assert_eq!(
            toks[1].kind,
            TokenKind::Text {
                content: "Zoë 😄".into(),
            }
        );
    }

    #[test]
    fn offsets_count_bytes_not_chars() {
        let toks = tokens("<name>Zoë</name>");
        // "Zoë" is 4 bytes; the close tag starts after it.
        assert_eq!(toks[2].offset, 6 + 4);
    }
}
