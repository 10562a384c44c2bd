//! Care recipients.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::deserialize_id;

/// A care recipient profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elder {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Elder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Elder {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Elder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Id → elder lookup over a borrowed roster.
///
/// When the roster lists the same id twice the first entry wins.
pub struct Roster<'a> {
    by_id: HashMap<&'a str, &'a Elder>,
}

impl<'a> Roster<'a> {
    pub fn new(elders: &'a [Elder]) -> Self {
        let mut by_id = HashMap::with_capacity(elders.len());
        for elder in elders {
            by_id.entry(elder.id.as_str()).or_insert(elder);
        }
        Roster { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Elder> {
        self.by_id.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_first_entry_wins() {
        let elders = vec![
            Elder::new("e1", "Margaret"),
            Elder::new("e2", "Harold"),
            Elder::new("e1", "Duplicate"),
        ];
        let roster = Roster::new(&elders);

        assert_eq!(roster.get("e1").map(|e| e.name.as_str()), Some("Margaret"));
        assert_eq!(roster.get("e2").map(|e| e.name.as_str()), Some("Harold"));
        assert!(roster.get("e3").is_none());
    }

    #[test]
    fn test_display_falls_back_to_id() {
        assert_eq!(Elder::new("e9", "").to_string(), "e9");
        assert_eq!(Elder::new("e9", "Ruth").to_string(), "Ruth");
    }
}
