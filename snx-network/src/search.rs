//! Post search
//!
//!     Word queries compile to a case-insensitive whole-word regex over
//!     post content: a hit must be delimited by non-word characters or
//!     the text edges, so punctuation-edged queries like "(sale)" still
//!     work. Topic queries compare case-insensitively against whole
//!     topic entries. Results come back in document order.

use regex::Regex;

use crate::model::{Post, SocialNetwork};

/// A compiled post query.
#[derive(Debug, Clone)]
pub enum PostQuery {
    Word(Regex),
    /// Lowercased topic to match entries against.
    Topic(String),
}

impl PostQuery {
    /// Whole-word, case-insensitive match against post content.
    ///
    /// Explicit delimiter classes instead of `\b`: the queried word may
    /// itself start or end in a non-word character, where `\b` never
    /// matches.
    pub fn word(word: &str) -> Result<PostQuery, regex::Error> {
        let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(word));
        Ok(PostQuery::Word(Regex::new(&pattern)?))
    }

    /// Case-insensitive exact match against a post topic.
    pub fn topic(topic: &str) -> PostQuery {
        PostQuery::Topic(topic.to_lowercase())
    }

    fn selects(&self, post: &Post) -> bool {
        match self {
            PostQuery::Word(pattern) => pattern.is_match(&post.content),
            PostQuery::Topic(wanted) => post.topics.iter().any(|t| t.to_lowercase() == *wanted),
        }
    }
}

/// One matching post with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMatch {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub topics: Vec<String>,
}

/// Every post selected by `query`, in document order.
pub fn search_posts(network: &SocialNetwork, query: &PostQuery) -> Vec<PostMatch> {
    let mut matches = Vec::new();
    for user in network.users() {
        for post in &user.posts {
            if query.selects(post) {
                matches.push(PostMatch {
                    user_id: user.id.clone(),
                    user_name: user.name.clone(),
                    content: post.content.clone(),
                    topics: post.topics.clone(),
                });
            }
        }
    }
    matches
}
