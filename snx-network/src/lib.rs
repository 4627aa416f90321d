//! # snx-network
//!
//! The social-network layer over parsed documents: extraction of the
//! user/post/edge model, degree analysis and follow recommendations on
//! the resulting graph, post search, and the domain JSON report.
//!
//! Everything here consumes a [`snx_parser::xml::Tree`] by reference and
//! owns its results; nothing writes back into the document. The usual
//! flow is extract once, then query:
//!
//!     Tree -> network_from_tree -> SocialNetwork -> { FollowGraph
//!                                                   | search_posts
//!                                                   | users_value }

pub mod extract;
pub mod graph;
pub mod model;
pub mod report;
pub mod search;

pub use extract::network_from_tree;
pub use graph::{DegreeEntry, FollowGraph, Profile, Suggestion};
pub use model::{Edge, Post, SocialNetwork, User};
pub use report::{integrity_errors, users_value};
pub use search::{search_posts, PostMatch, PostQuery};
