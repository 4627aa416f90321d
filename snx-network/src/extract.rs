//! Tree-to-model extraction
//!
//!     Reads the structure conventions of the social documents, every
//!     part optional per user:
//!
//!       id          "id" attribute, else an <id> child (attribute wins)
//!       name        <name> child, defaulted to "User {id}"
//!       posts       any descendant <post>: <body> text plus
//!                   <topics>/<topic> entries
//!       followers   <followers>/<follower>/<id>
//!       followings  <followings>/<following>/<id> plus the
//!                   <connections>/<friend user_id=".."> form
//!
//!     Edge direction: a follower entry and a connection are both read
//!     as an outgoing edge of the declaring user (u follows v).
//!     Followings entries feed the model only, never the edge list.

use std::collections::HashMap;

use snx_parser::xml::{NodeId, Tree};

use crate::model::{Edge, Post, SocialNetwork, User};

/// Extract every `user` element, wherever it nests, into the model.
///
/// Users without a usable id are skipped. A later element carrying an
/// already-seen id replaces the earlier user in place; its edges are
/// kept from both elements.
pub fn network_from_tree(tree: &Tree) -> SocialNetwork {
    let mut users: Vec<User> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut edges: Vec<Edge> = Vec::new();

    for elem in tree.elements_named("user") {
        let Some(id) = user_id(tree, elem) else {
            log::debug!(target: "snx.network", "user element without id skipped");
            continue;
        };

        let followers = id_list(tree, elem, "followers", "follower");
        let mut followings = id_list(tree, elem, "followings", "following");
        let friends = friend_ids(tree, elem);

        for to in &followers {
            edges.push(Edge::new(id.clone(), to.clone()));
        }
        for to in &friends {
            edges.push(Edge::new(id.clone(), to.clone()));
        }
        followings.extend(friends);

        let user = User {
            name: user_name(tree, elem, &id),
            posts: posts_of(tree, elem),
            followers,
            followings,
            id,
        };
        match by_id.get(&user.id) {
            Some(&slot) => users[slot] = user,
            None => {
                by_id.insert(user.id.clone(), users.len());
                users.push(user);
            }
        }
    }

    SocialNetwork::new(users, edges)
}

/// The user's id. An "id" attribute, even a blank one, shadows any <id>
/// child; a blank winner means no usable id.
fn user_id(tree: &Tree, user: NodeId) -> Option<String> {
    if let Some(value) = tree.node(user).attribute("id").filter(|v| !v.is_empty()) {
        let value = value.trim();
        return if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    }
    let child = tree.child_named(user, "id")?;
    let text = tree.node(child).text.as_deref()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn user_name(tree: &Tree, user: NodeId, id: &str) -> String {
    tree.child_named(user, "name")
        .and_then(|name| tree.node(name).text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("User {id}"))
}

fn posts_of(tree: &Tree, user: NodeId) -> Vec<Post> {
    let mut posts = Vec::new();
    for elem in descendants_named(tree, user, "post") {
        let id = tree.node(elem).attribute("id").map(str::to_string);
        let content = tree
            .child_named(elem, "body")
            .and_then(|body| tree.node(body).text.as_deref())
            .map(str::trim)
            .map(str::to_string)
            .unwrap_or_default();
        posts.push(Post {
            id,
            content,
            topics: topic_texts(tree, elem),
        });
    }
    posts
}

/// Texts of every descendant <topic> sitting directly under a <topics>.
fn topic_texts(tree: &Tree, post: NodeId) -> Vec<String> {
    let mut topics = Vec::new();
    for elem in descendants_named(tree, post, "topic") {
        let under_topics = tree.node(elem).parent.is_some_and(|p| tree.node(p).name == "topics");
        if !under_topics {
            continue;
        }
        if let Some(text) = tree.node(elem).text.as_deref() {
            let text = text.trim();
            if !text.is_empty() {
                topics.push(text.to_string());
            }
        }
    }
    topics
}

/// Ids under `<group>/<entry>/<id>` children of `user`, blanks dropped.
fn id_list(tree: &Tree, user: NodeId, group: &str, entry: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let Some(group_id) = tree.child_named(user, group) else {
        return ids;
    };
    for &child in &tree.node(group_id).children {
        if tree.node(child).name != entry {
            continue;
        }
        let Some(id_elem) = tree.child_named(child, "id") else {
            continue;
        };
        if let Some(text) = tree.node(id_elem).text.as_deref() {
            let text = text.trim();
            if !text.is_empty() {
                ids.push(text.to_string());
            }
        }
    }
    ids
}

/// `user_id` attributes of `<connections>/<friend>` children of `user`.
fn friend_ids(tree: &Tree, user: NodeId) -> Vec<String> {
    let mut ids = Vec::new();
    let Some(connections) = tree.child_named(user, "connections") else {
        return ids;
    };
    for &child in &tree.node(connections).children {
        if tree.node(child).name != "friend" {
            continue;
        }
        if let Some(value) = tree.node(child).attribute("user_id") {
            let value = value.trim();
            if !value.is_empty() {
                ids.push(value.to_string());
            }
        }
    }
    ids
}

fn descendants_named<'a>(
    tree: &'a Tree,
    root: NodeId,
    name: &'a str,
) -> impl Iterator<Item = NodeId> + 'a {
    tree.descendants(root)
        .filter(move |id| tree.node(*id).name == name)
}
