//! Explicit-stack tree construction
//!
//!     The builder consumes the token stream with a mutable stack of
//!     in-progress nodes. No recursion anywhere: memory use is bounded by
//!     nesting depth at runtime, not by the call stack.
//!
//!     The stack bottom is always the synthetic document root, so every
//!     token has a well-defined home. Open tags push, close tags resolve
//!     against the stack through the rules in [`super::validate`], text
//!     appends to the stack top. In `Strict` mode the first anomaly
//!     aborts with no partial tree; in `Lenient` mode the builder always
//!     produces a tree plus the ordered list of repairs it made.

use super::error::{ParseError, ParseErrorKind, XmlError};
use super::token::{Attribute, TokenKind};
use super::tokenizer::Tokenizer;
use super::tree::{NodeId, Tree};
use super::validate::{
    classify_close, dedupe_attributes, CloseAction, CorrectionKind, CorrectionRecord,
};
use super::ParseMode;

/// Result of a lenient parse: the tree and every repair, in the order
/// the repairs were applied.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseOutcome {
    pub tree: Tree,
    pub corrections: Vec<CorrectionRecord>,
}

impl ParseOutcome {
    /// True when the document needed no repairs.
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Parse `source` strictly: the first anomaly fails.
pub fn parse(source: &str) -> Result<Tree, XmlError> {
    TreeBuilder::new(ParseMode::Strict)
        .build(source)
        .map(|outcome| outcome.tree)
}

/// Parse `source` leniently: nesting anomalies are repaired and
/// recorded. Lexical errors with no recovery point still fail.
pub fn parse_lenient(source: &str) -> Result<ParseOutcome, XmlError> {
    TreeBuilder::new(ParseMode::Lenient).build(source)
}

/// Token-stream to tree construction, parameterized by [`ParseMode`].
pub struct TreeBuilder {
    mode: ParseMode,
}

impl TreeBuilder {
    pub fn new(mode: ParseMode) -> Self {
        TreeBuilder { mode }
    }

    pub fn build(&self, source: &str) -> Result<ParseOutcome, XmlError> {
        let mut tree = Tree::new();
        let root = tree.root();
        let mut open: Vec<NodeId> = vec![root];
        let mut corrections: Vec<CorrectionRecord> = Vec::new();

        for item in Tokenizer::new(source, self.mode) {
            let token = item?;
            match token.kind {
                TokenKind::Comment { .. } => {}
                TokenKind::Declaration { .. } => {
                    // Keep the document's own `<?xml ...?>` prolog for the
                    // formatter; everything else (DOCTYPE, mid-document
                    // instructions) is trivia here.
                    if open.len() == 1
                        && tree.has_no_elements()
                        && tree.declaration().is_none()
                        && token.raw.starts_with("<?")
                    {
                        tree.set_declaration(&token.raw);
                    }
                }
                TokenKind::Text { content } => {
                    let top = open.last().copied().unwrap_or(root);
                    if top == root
                        && self.mode == ParseMode::Strict
                        && content.chars().any(|c| !c.is_whitespace())
                    {
                        return Err(ParseError::new(
                            ParseErrorKind::UnexpectedToken,
                            token.offset,
                            "text outside any element",
                        )
                        .into());
                    }
                    tree.append_text(top, &content);
                }
                TokenKind::OpenTag { name, attributes } => {
                    let id = self.attach_element(
                        &mut tree,
                        &open,
                        &mut corrections,
                        name,
                        attributes,
                        token.offset,
                    )?;
                    open.push(id);
                }
                TokenKind::SelfClosingTag { name, attributes } => {
                    self.attach_element(
                        &mut tree,
                        &open,
                        &mut corrections,
                        name,
                        attributes,
                        token.offset,
                    )?;
                }
                TokenKind::CloseTag { name } => {
                    self.resolve_close(&tree, &mut open, &mut corrections, &name, token.offset)?;
                }
            }
        }

        // End of stream: everything still open gets closed top-first.
        while open.len() > 1 {
            let Some(top) = open.pop() else { break };
            let name = tree.node(top).name.clone();
            if self.mode == ParseMode::Strict {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    source.len(),
                    format!("<{}> never closed", name),
                )
                .into());
            }
            push_record(
                &mut corrections,
                CorrectionRecord::new(
                    CorrectionKind::UnclosedTag,
                    source.len(),
                    format!("<{}> still open at end of input", name),
                ),
            );
        }

        if self.mode == ParseMode::Strict && tree.has_no_elements() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyDocument,
                0,
                "the document has no root element",
            )
            .into());
        }

        Ok(ParseOutcome { tree, corrections })
    }

    /// Create the element for an open or self-closing tag under the
    /// current stack top, applying the duplicate-attribute rule.
    fn attach_element(
        &self,
        tree: &mut Tree,
        open: &[NodeId],
        corrections: &mut Vec<CorrectionRecord>,
        name: String,
        attributes: Vec<Attribute>,
        offset: usize,
    ) -> Result<NodeId, XmlError> {
        let (attributes, duplicates) = dedupe_attributes(attributes, &name, offset);
        if let (ParseMode::Strict, Some(first)) = (self.mode, duplicates.first()) {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                offset,
                first.detail.clone(),
            )
            .into());
        }
        let parent = open.last().copied().unwrap_or_else(|| tree.root());
        if self.mode == ParseMode::Strict && parent == tree.root() && !tree.has_no_elements() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                offset,
                format!("second top-level element <{}>", name),
            )
            .into());
        }
        for record in duplicates {
            push_record(corrections, record);
        }
        Ok(tree.append_element(parent, name, attributes))
    }

    /// Resolve a close tag against the open-element stack.
    fn resolve_close(
        &self,
        tree: &Tree,
        open: &mut Vec<NodeId>,
        corrections: &mut Vec<CorrectionRecord>,
        name: &str,
        offset: usize,
    ) -> Result<(), XmlError> {
        // The document root at the bottom is never matchable.
        let action = classify_close(
            open[1..].iter().rev().map(|id| tree.node(*id).name.as_str()),
            name,
        );
        match action {
            CloseAction::Matched { depth: 0 } => {
                open.pop();
                Ok(())
            }
            CloseAction::Matched { depth } => {
                if self.mode == ParseMode::Strict {
                    let innermost = open.last().map(|id| tree.node(*id).name.as_str());
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        offset,
                        format!(
                            "close tag </{}> while <{}> is open",
                            name,
                            innermost.unwrap_or("")
                        ),
                    )
                    .into());
                }
                for _ in 0..depth {
                    let Some(unclosed) = open.pop() else { break };
                    push_record(
                        corrections,
                        CorrectionRecord::new(
                            CorrectionKind::UnclosedTag,
                            offset,
                            format!(
                                "<{}> closed implicitly by </{}>",
                                tree.node(unclosed).name,
                                name
                            ),
                        ),
                    );
                }
                open.pop();
                push_record(
                    corrections,
                    CorrectionRecord::new(
                        CorrectionKind::MismatchedClose,
                        offset,
                        format!("</{}> did not match the innermost open element", name),
                    ),
                );
                Ok(())
            }
            CloseAction::Stray => {
                if self.mode == ParseMode::Strict {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        offset,
                        format!("close tag </{}> matches nothing", name),
                    )
                    .into());
                }
                push_record(
                    corrections,
                    CorrectionRecord::new(
                        CorrectionKind::StrayClose,
                        offset,
                        format!("</{}> matches no open element; ignored", name),
                    ),
                );
                Ok(())
            }
        }
    }
}

fn push_record(corrections: &mut Vec<CorrectionRecord>, record: CorrectionRecord) {
    log::debug!(target: "snx.builder", "repair: {record}");
    corrections.push(record);
}
