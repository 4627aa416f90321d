//! Model-level reporting
//!
//!     The domain JSON shape and the referential consistency check. Both
//!     read the model as-is; neither touches the document tree.

use std::collections::HashSet;

use crate::model::SocialNetwork;

/// The users export: `{"users": [...]}` with each user serialized per
/// [`crate::model::User`].
pub fn users_value(network: &SocialNetwork) -> serde_json::Value {
    serde_json::json!({ "users": network.users() })
}

/// Follower and following entries naming ids no extracted user carries,
/// one message per entry. Empty means the references are consistent.
pub fn integrity_errors(network: &SocialNetwork) -> Vec<String> {
    let known: HashSet<&str> = network.users().iter().map(|u| u.id.as_str()).collect();
    let mut errors = Vec::new();
    for user in network.users() {
        for follower in &user.followers {
            if !known.contains(follower.as_str()) {
                errors.push(format!(
                    "User {} has non-existent follower: {}",
                    user.id, follower
                ));
            }
        }
        for following in &user.followings {
            if !known.contains(following.as_str()) {
                errors.push(format!(
                    "User {} is following non-existent user: {}",
                    user.id, following
                ));
            }
        }
    }
    errors
}
