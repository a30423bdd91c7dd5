use crate::catalog::TranslationFile;
use crate::changes::ChangeSet;
use crate::json_utils::{set_value_at_path, split_first_segment};
use serde_json::Value;
use tracing::warn;

/// Applies pending edits to the loaded files.
///
/// Returns only the files at least one change targets, each with every one
/// of its edits written back at its dot path. The input is not modified.
pub fn apply_changes(files: &[TranslationFile], changes: &ChangeSet) -> Vec<TranslationFile> {
    if changes.is_empty() {
        return Vec::new();
    }

    let mut targeted: Vec<(String, &str, &str)> = Vec::with_capacity(changes.len());
    for change in changes.iter() {
        match split_first_segment(&change.id) {
            Some((file_name, key)) => targeted.push((file_name, key, &change.new_value)),
            None => warn!(id = %change.id, "Ignoring change with malformed id"),
        }
    }

    let mut modified = Vec::new();
    for file in files {
        let mut data = file.data.clone();
        let mut touched = false;
        for (file_name, key, new_value) in &targeted {
            if *file_name == file.file_name {
                set_value_at_path(&mut data, key, Value::String(new_value.to_string()));
                touched = true;
            }
        }
        if touched {
            modified.push(TranslationFile { data, ..file.clone() });
        }
    }
    modified
}
