use crate::json_utils::{Tree, escape_key, flatten_tree};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One translation namespace as read from the locales directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationFile {
    /// Base name without the `.json` extension, unique per project.
    pub file_name: String,
    /// Display path relative to the project root.
    pub file_path: PathBuf,
    pub data: Tree,
}

impl TranslationFile {
    pub fn new(file_name: impl Into<String>, file_path: impl Into<PathBuf>, data: Tree) -> Self {
        Self { file_name: file_name.into(), file_path: file_path.into(), data }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    Text,
    Null,
    Bool,
    Number,
    Array,
    Object,
}

impl LeafKind {
    fn of(v: &Value) -> Self {
        match v {
            Value::String(_) => LeafKind::Text,
            Value::Null => LeafKind::Null,
            Value::Bool(_) => LeafKind::Bool,
            Value::Number(_) => LeafKind::Number,
            Value::Array(_) => LeafKind::Array,
            // never reaches the catalog; flattening descends into objects
            Value::Object(_) => LeafKind::Object,
        }
    }
}

/// A single editable leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: String,
    pub key: String,
    pub value: String,
    pub kind: LeafKind,
    pub file_name: String,
    pub file_path: PathBuf,
}

impl Entry {
    pub fn is_text(&self) -> bool {
        self.kind == LeafKind::Text
    }
}

/// Builds the globally unique id of a leaf: file name, a dot, the dot path.
pub fn entry_id(file_name: &str, key: &str) -> String {
    format!("{}.{}", escape_key(file_name), key)
}

fn leaf_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// All entries of a project keyed by id, in file then document order.
///
/// Derived data: always rebuilt from the files, never edited directly.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<String, Entry>,
}

impl Catalog {
    pub fn build(files: &[TranslationFile]) -> Self {
        let mut entries = IndexMap::new();
        for file in files {
            for (key, value) in flatten_tree(&file.data) {
                let id = entry_id(&file.file_name, &key);
                let entry = Entry {
                    id: id.clone(),
                    key,
                    value: leaf_text(&value),
                    kind: LeafKind::of(&value),
                    file_name: file.file_name.clone(),
                    file_path: file.file_path.clone(),
                };
                entries.insert(id, entry);
            }
        }
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Reorders entries by id so later filtering is deterministic.
    pub fn sort_by_id(&mut self) {
        self.entries.sort_keys();
    }

    /// Sorted, de-duplicated file names of every entry.
    pub fn unique_file_names(&self) -> Vec<String> {
        self.entries
            .values()
            .map(|e| e.file_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn non_text_count(&self) -> usize {
        self.entries.values().filter(|e| !e.is_text()).count()
    }
}
