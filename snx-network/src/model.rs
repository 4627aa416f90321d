//! The extracted social-network model
//!
//!     Plain owned data, decoupled from the document tree it came from.
//!     `User` and `Post` serialize straight to the domain JSON shape
//!     (`{"users": [...]}`, see [`crate::report::users_value`]), so their
//!     field names are wire names. Edges are kept separately: a follower
//!     entry and a connection both produce an edge, a followings entry
//!     does not, so the edge list cannot be rebuilt from the users alone.

use serde::{Deserialize, Serialize};

/// One post authored by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post ids are optional in the documents; a missing id serializes
    /// as `null`.
    pub id: Option<String>,
    pub content: String,
    pub topics: Vec<String>,
}

/// One user with everything the document declares about them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub posts: Vec<Post>,
    pub followers: Vec<String>,
    pub followings: Vec<String>,
}

/// A follows relation: `from` follows `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Edge {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The complete model extracted from one document: users in document
/// order plus the follow edges they declare.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SocialNetwork {
    users: Vec<User>,
    edges: Vec<Edge>,
}

impl SocialNetwork {
    pub fn new(users: Vec<User>, edges: Vec<Edge>) -> SocialNetwork {
        SocialNetwork { users, edges }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The user with this id, if one was extracted.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
