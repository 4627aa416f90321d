//! Correction records and the repair rules
//!
//!     The validator is a set of decisions over the open-element stack:
//!     what a close tag matches, and what a duplicated attribute key
//!     means. The builder owns the stack and the tree; this module owns
//!     the rules and the record type, so strict and lenient parsing
//!     cannot drift apart on what counts as an anomaly.
//!
//!     Records are a side list in detection order. They never appear in
//!     the tree itself, and re-parsing a corrected document's output
//!     yields no records (repair is idempotent).

use std::fmt;

use super::token::Attribute;

/// The closed set of repairs the lenient parser can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CorrectionKind {
    /// An element was still open when something forced it shut: a
    /// mismatched close above it, or end of input.
    UnclosedTag,
    /// A close tag matched an ancestor, not the innermost open element.
    MismatchedClose,
    /// A repeated attribute key; the first occurrence wins.
    DuplicateAttribute,
    /// A close tag matching nothing on the stack; ignored.
    StrayClose,
}

impl CorrectionKind {
    pub fn label(self) -> &'static str {
        match self {
            CorrectionKind::UnclosedTag => "unclosed-tag",
            CorrectionKind::MismatchedClose => "mismatched-close",
            CorrectionKind::DuplicateAttribute => "duplicate-attribute",
            CorrectionKind::StrayClose => "stray-close",
        }
    }
}

/// One repair: what was done, where, and to which tag.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CorrectionRecord {
    pub kind: CorrectionKind,
    /// Byte offset of the token that triggered the repair.
    pub offset: usize,
    pub detail: String,
}

impl CorrectionRecord {
    pub fn new(kind: CorrectionKind, offset: usize, detail: impl Into<String>) -> Self {
        CorrectionRecord {
            kind,
            offset,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CorrectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] byte {}: {}",
            self.kind.label(),
            self.offset,
            self.detail
        )
    }
}

/// What a close tag does to the open-element stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseAction {
    /// Matches the open element `depth` entries below the stack top
    /// (0 = the top itself). Everything above the match is unclosed.
    Matched { depth: usize },
    /// Matches nothing; the close tag is stray.
    Stray,
}

/// Classify `name` against the open elements, iterated top-first.
///
/// The synthetic document root must not be offered here; it is never
/// matchable.
pub(crate) fn classify_close<'a, I>(open_names: I, name: &str) -> CloseAction
where
    I: Iterator<Item = &'a str>,
{
    for (depth, open) in open_names.enumerate() {
        if open == name {
            return CloseAction::Matched { depth };
        }
    }
    CloseAction::Stray
}

/// Apply the duplicate-key rule: first occurrence wins, every later one
/// is dropped and recorded.
pub(crate) fn dedupe_attributes(
    attributes: Vec<Attribute>,
    tag: &str,
    offset: usize,
) -> (Vec<Attribute>, Vec<CorrectionRecord>) {
    let mut kept: Vec<Attribute> = Vec::with_capacity(attributes.len());
    let mut records = Vec::new();
    for attribute in attributes {
        if kept.iter().any(|a| a.key == attribute.key) {
            records.push(CorrectionRecord::new(
                CorrectionKind::DuplicateAttribute,
                offset,
                format!(
                    "attribute `{}` repeated on <{}>; kept the first value",
                    attribute.key, tag
                ),
            ));
        } else {
            kept.push(attribute);
        }
    }
    (kept, records)
}
