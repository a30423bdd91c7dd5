use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A pending edit of one entry. `new_value` never equals `original_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditChange {
    pub id: String,
    pub original_value: String,
    pub new_value: String,
}

/// Sparse set of pending edits keyed by entry id.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    changes: HashMap<String, EditChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an edit, or drops it when the value is back to the original.
    pub fn set_value(&mut self, id: &str, new_value: &str, original_value: &str) {
        if new_value == original_value {
            if self.changes.remove(id).is_some() {
                debug!(id = %id, "Edit reverted");
            }
            return;
        }
        debug!(id = %id, "Edit recorded");
        self.changes.insert(
            id.to_string(),
            EditChange {
                id: id.to_string(),
                original_value: original_value.to_string(),
                new_value: new_value.to_string(),
            },
        );
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }

    pub fn get(&self, id: &str) -> Option<&EditChange> {
        self.changes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.changes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditChange> {
        self.changes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_a_differing_value() {
        let mut changes = ChangeSet::new();
        changes.set_value("common.nav.home", "Start", "Home");
        let change = changes.get("common.nav.home").unwrap();
        assert_eq!(change.original_value, "Home");
        assert_eq!(change.new_value, "Start");
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn editing_back_to_original_removes_the_change() {
        let mut changes = ChangeSet::new();
        changes.set_value("id", "v1", "v0");
        changes.set_value("id", "v0", "v0");
        assert!(!changes.contains("id"));
        assert!(changes.is_empty());
    }

    #[test]
    fn equal_value_on_untracked_id_is_a_no_op() {
        let mut changes = ChangeSet::new();
        changes.set_value("id", "same", "same");
        assert!(changes.is_empty());
    }

    #[test]
    fn later_edit_overwrites_earlier_one() {
        let mut changes = ChangeSet::new();
        changes.set_value("id", "first", "orig");
        changes.set_value("id", "second", "orig");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("id").unwrap().new_value, "second");
    }

    #[test]
    fn clear_empties_everything() {
        let mut changes = ChangeSet::new();
        changes.set_value("a", "1", "0");
        changes.set_value("b", "1", "0");
        changes.clear();
        assert!(changes.is_empty());
        assert_eq!(changes.iter().count(), 0);
    }
}
