//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and its byte representations.

pub mod binary;
pub mod json;
pub mod xml;

pub use binary::BinaryFormat;
pub use json::JsonFormat;
pub use xml::XmlFormat;
