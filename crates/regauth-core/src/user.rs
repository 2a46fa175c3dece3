//! User records as stored in the user store.

use serde::{Deserialize, Serialize};

/// Key namespace under which user records are stored.
pub const USER_NAMESPACE: &str = "users";

/// Store key for a user identified by email or username.
pub fn user_key(identifier: &str) -> String {
    format!("{USER_NAMESPACE}/{identifier}")
}

/// A registry user.
///
/// `password` holds the stored password secret (a PHC hash string), never
/// the plaintext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    /// The store keys this user is reachable under.
    pub fn store_keys(&self) -> Vec<String> {
        let mut keys = vec![user_key(&self.username)];
        if !self.email.is_empty() {
            keys.push(user_key(&self.email));
        }
        keys
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
