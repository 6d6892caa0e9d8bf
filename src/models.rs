use serde::{Deserialize, Serialize};

/// Numeric user identity as it appears in requests and on the wire.
pub type UserId = i64;

/// A known user. Identity is the id; names are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Record published to the notification topic.
///
/// Built per request from two resolved users and dropped after publishing.
/// Field order is the JSON field order consumers see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub from: User,
    pub to: User,
    pub message: String,
}

impl Notification {
    /// Partition key: the recipient id in decimal, so every notification for
    /// one recipient lands on the same partition.
    pub fn routing_key(&self) -> String {
        self.to.id.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
