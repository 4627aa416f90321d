//! Degree analysis and recommendations over the follow graph
//!
//!     Direction convention: an edge u -> v records that u follows v, so
//!     a node's followers are its in-neighbors and every query below
//!     reads in those terms. Ids referenced by an edge but never
//!     declared as users still count as graph nodes; they display as the
//!     bare id. Adjacency lives in ordered sets, which deduplicates
//!     repeated edges and makes every tie-break deterministic: ties go
//!     to the smallest id.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::SocialNetwork;

/// A user (or bare referenced id) named in an analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

/// Winner of a degree query plus the degree that won it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeEntry {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// One follow recommendation. `score` counts how many of the asking
/// user's followings follow the suggested user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub score: usize,
}

/// The follow digraph of one extracted network.
#[derive(Debug, Clone, Default)]
pub struct FollowGraph {
    nodes: BTreeSet<String>,
    names: BTreeMap<String, String>,
    following: BTreeMap<String, BTreeSet<String>>,
    followers: BTreeMap<String, BTreeSet<String>>,
}

impl FollowGraph {
    pub fn new(network: &SocialNetwork) -> FollowGraph {
        let mut graph = FollowGraph::default();
        for user in network.users() {
            graph.nodes.insert(user.id.clone());
            graph.names.insert(user.id.clone(), user.name.clone());
        }
        for edge in network.edges() {
            graph.nodes.insert(edge.from.clone());
            graph.nodes.insert(edge.to.clone());
            graph
                .following
                .entry(edge.from.clone())
                .or_default()
                .insert(edge.to.clone());
            graph
                .followers
                .entry(edge.to.clone())
                .or_default()
                .insert(edge.from.clone());
        }
        graph
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// The extracted user's name, or the bare id for a node that only
    /// ever appeared as an edge endpoint.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id)
    }

    /// The most followed node: maximum in-degree.
    pub fn most_influential(&self) -> Option<DegreeEntry> {
        self.max_by_degree(&self.followers)
    }

    /// The node following the most others: maximum out-degree.
    pub fn most_active(&self) -> Option<DegreeEntry> {
        self.max_by_degree(&self.following)
    }

    fn max_by_degree(&self, adjacency: &BTreeMap<String, BTreeSet<String>>) -> Option<DegreeEntry> {
        let mut best: Option<DegreeEntry> = None;
        for id in &self.nodes {
            let count = adjacency.get(id).map_or(0, BTreeSet::len);
            if best.as_ref().is_none_or(|b| count > b.count) {
                best = Some(DegreeEntry {
                    id: id.clone(),
                    name: self.display_name(id).to_string(),
                    count,
                });
            }
        }
        best
    }

    /// Nodes following every one of `ids`, ascending by id. Empty when
    /// `ids` is empty or any of them has no followers.
    pub fn mutual_followers(&self, ids: &[&str]) -> Vec<Profile> {
        let Some((first, rest)) = ids.split_first() else {
            return Vec::new();
        };
        let mut mutual: BTreeSet<String> = match self.followers.get(*first) {
            Some(set) => set.clone(),
            None => return Vec::new(),
        };
        for id in rest {
            match self.followers.get(*id) {
                Some(set) => mutual.retain(|m| set.contains(m)),
                None => return Vec::new(),
            }
            if mutual.is_empty() {
                break;
            }
        }
        mutual
            .into_iter()
            .map(|id| Profile {
                name: self.display_name(&id).to_string(),
                id,
            })
            .collect()
    }

    /// Users followed by those `id` follows, excluding `id` itself and
    /// anyone already followed, scored by how many of `id`'s followings
    /// follow them. Highest score first, ties ascending by id, at most
    /// `limit` entries. Unknown ids get no suggestions.
    pub fn suggestions_for(&self, id: &str, limit: usize) -> Vec<Suggestion> {
        if !self.nodes.contains(id) {
            return Vec::new();
        }
        let none = BTreeSet::new();
        let following = self.following.get(id).unwrap_or(&none);

        let mut scores: BTreeMap<&String, usize> = BTreeMap::new();
        for followed in following {
            for candidate in self.following.get(followed).into_iter().flatten() {
                if candidate.as_str() == id || following.contains(candidate) {
                    continue;
                }
                *scores.entry(candidate).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<Suggestion> = scores
            .into_iter()
            .map(|(candidate, score)| Suggestion {
                id: candidate.clone(),
                name: self.display_name(candidate).to_string(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        ranked.truncate(limit);
        ranked
    }
}
