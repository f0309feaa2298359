//! Item entity and name comparison rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Case-folded form of a name. Two names collide when their keys are equal.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

impl Item {
    /// Case-insensitive substring match; an empty filter matches everything.
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter.is_empty() || name_key(&self.name).contains(&name_key(filter))
    }
}
