//! Known learners and their levels, loaded from `data/users.json`.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One learner allowed to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub level: u32,
    /// Fields the app does not interpret (photos, notes, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub users: Vec<RosterEntry>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Roster {
    /// Parse the roster document.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or lacks the `users` list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a learner by name, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RosterEntry> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        self.users
            .iter()
            .find(|entry| normalize(&entry.name) == wanted)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"{
        "users": [
            {"name": "Maria", "level": 3, "photo": "maria.png"},
            {"name": "Ángel", "level": 1},
            {"name": "José Luis", "level": 2}
        ]
    }"#;

    #[test]
    fn find_is_trimmed_and_case_insensitive() {
        let roster = Roster::from_json(ROSTER).unwrap();
        assert_eq!(roster.find("maria ").map(|e| e.level), Some(3));
        assert_eq!(roster.find("  MARIA").map(|e| e.level), Some(3));
        assert_eq!(roster.find("ángel").map(|e| e.level), Some(1));
        assert_eq!(roster.find("josé luis").map(|e| e.level), Some(2));
        assert!(roster.find("pedro").is_none());
        assert!(roster.find("   ").is_none());
    }

    #[test]
    fn keeps_unknown_fields() {
        let roster = Roster::from_json(ROSTER).unwrap();
        let maria = roster.find("Maria").unwrap();
        assert_eq!(maria.extra.get("photo"), Some(&Value::from("maria.png")));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn missing_users_list_is_an_error() {
        assert!(Roster::from_json(r#"{"people": []}"#).is_err());
        assert!(Roster::from_json("not json").is_err());
    }
}
