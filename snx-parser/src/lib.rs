//! # snx-parser
//!
//! The parse side of the snx XML engine: a hand-written tokenizer, an
//! explicit-stack tree builder, and the validator that repairs malformed
//! nesting while recording every correction it makes.
//!
//! The pipeline is strictly staged:
//!
//!     source text -> Tokenizer -> tokens -> TreeBuilder -> Tree (+ corrections)
//!
//! Each stage consumes the previous one's complete output. There is no
//! shared mutable state between stages, and nothing here touches the
//! filesystem except [`xml::loader::DocumentLoader`], which exists so the
//! CLI and tests can read a document into memory with one call.
//!
//! Strictness is a parameter, not a subclass: every entry point takes a
//! [`xml::ParseMode`]. `Strict` fails on the first anomaly; `Lenient`
//! repairs and keeps going, returning the ordered repair log alongside
//! the tree.

pub mod xml;
