//! Access lists granted by registry tokens.
//!
//! The wire shape follows the container-registry token protocol:
//!
//! ```json
//! [{"type": "repository", "name": "alice/*", "actions": ["push", "pull"]}]
//! ```

use serde::{Deserialize, Serialize};

/// Resource type for repository grants.
pub const REPOSITORY: &str = "repository";

/// An action a token may grant on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Pull,
    Push,
}

/// One grant: a set of actions on resources matching `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    /// Resource type, `repository` for every grant this authority issues.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Scoped path pattern, e.g. `alice/*` or `*/*`.
    pub name: String,

    /// Granted actions. Order and duplicates are preserved as given.
    pub actions: Vec<Action>,
}

impl AccessEntry {
    /// A repository grant.
    pub fn repository(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            resource_type: REPOSITORY.to_string(),
            name: name.into(),
            actions,
        }
    }
}

/// Ordered list of grants carried by a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessList(Vec<AccessEntry>);

impl AccessList {
    pub fn new(entries: Vec<AccessEntry>) -> Self {
        Self(entries)
    }

    /// Push and pull on every repository under `username`'s namespace.
    pub fn namespace(username: &str) -> Self {
        Self(vec![AccessEntry::repository(
            format!("{username}/*"),
            vec![Action::Push, Action::Pull],
        )])
    }

    /// Pull-only access to every repository in every namespace.
    pub fn public_pull() -> Self {
        Self(vec![AccessEntry::repository("*/*", vec![Action::Pull])])
    }

    pub fn entries(&self) -> &[AccessEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_grant() {
        let acl = AccessList::namespace("alice");
        assert_eq!(acl.len(), 1);

        let entry = &acl.entries()[0];
        assert_eq!(entry.resource_type, "repository");
        assert_eq!(entry.name, "alice/*");
        assert_eq!(entry.actions, vec![Action::Push, Action::Pull]);
    }

    #[test]
    fn test_public_pull_grant() {
        let acl = AccessList::public_pull();
        let entry = &acl.entries()[0];
        assert_eq!(entry.name, "*/*");
        assert_eq!(entry.actions, vec![Action::Pull]);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&AccessList::namespace("bob")).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"repository","name":"bob/*","actions":["push","pull"]}]"#
        );
    }

    #[test]
    fn test_order_and_duplicates_survive_encoding() {
        let raw = r#"[{"type":"repository","name":"a/b","actions":["pull","push","pull"]}]"#;
        let acl: AccessList = serde_json::from_str(raw).unwrap();
        assert_eq!(
            acl.entries()[0].actions,
            vec![Action::Pull, Action::Push, Action::Pull]
        );
        assert_eq!(serde_json::to_string(&acl).unwrap(), raw);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let raw = r#"[{"type":"repository","name":"a/b","actions":["delete"]}]"#;
        assert!(serde_json::from_str::<AccessList>(raw).is_err());
    }
}
