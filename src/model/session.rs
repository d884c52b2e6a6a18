use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque user identifier handed out by the API.
///
/// The client treats it as text but remembers whether the API sent a JSON
/// number or a string, and writes it back the same way. Two ids are equal
/// when their text is.
#[derive(Debug, Clone)]
pub struct UserId {
    text: String,
    numeric: bool,
}

impl UserId {
    /// An id from its text. Canonical integers (`"42"`, not `"007"`) are
    /// written as JSON numbers.
    pub fn new(id: impl Into<String>) -> Self {
        let text = id.into();
        let numeric = text.parse::<i64>().is_ok_and(|n| n.to_string() == text);
        UserId { text, numeric }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for UserId {}

impl Hash for UserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text.parse::<i64>() {
            Ok(n) if self.numeric => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => UserId {
                text: n.to_string(),
                numeric: true,
            },
            Raw::Str(text) => UserId {
                text,
                numeric: false,
            },
        })
    }
}

/// The locally persisted identity of a logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
}
