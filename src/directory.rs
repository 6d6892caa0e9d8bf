// ============================================================================
// User Directory
// ============================================================================
//
// Resolves user ids to users. The publisher only sees the `UserDirectory`
// trait, so the in-memory roster can be replaced by a real identity store
// without touching publishing code.
//
// ============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::models::{User, UserId};

/// Lookup capability for sender and recipient ids.
pub trait UserDirectory: Send + Sync {
    fn resolve(&self, id: UserId) -> Option<User>;
}

/// Fixed, ordered roster searched linearly. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    users: Vec<User>,
}

impl StaticDirectory {
    pub fn new(users: Vec<User>) -> Self {
        let mut seen = HashSet::new();
        for user in &users {
            if !seen.insert(user.id) {
                // First entry wins on lookup; later ones are unreachable
                warn!(user_id = user.id, "Duplicate user id in roster");
            }
        }
        Self { users }
    }

    /// Built-in roster used when no roster file is configured.
    pub fn builtin() -> Self {
        Self::new(vec![
            User::new(1, "Emma"),
            User::new(2, "Bruno"),
            User::new(3, "Rick"),
            User::new(4, "Lena"),
        ])
    }

    /// Load a roster from a JSON array of `{"id": .., "name": ..}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read user roster {}", path.display()))?;
        let users: Vec<User> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid user roster {}", path.display()))?;

        info!(path = %path.display(), users = users.len(), "Loaded user roster");
        Ok(Self::new(users))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for StaticDirectory {
    fn resolve(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }
}
