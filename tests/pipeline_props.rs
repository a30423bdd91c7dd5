use copyedit::json_utils::{Tree, flatten_tree, unflatten};
use copyedit::{Catalog, ChangeSet, TranslationFile, apply_changes};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;

// keys mix in dots, backslashes and the empty key
const KEY: &str = "[a-z.\\\\]{0,3}";

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[ -~]{0,8}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        Just(Value::Null),
        proptest::collection::vec("[a-z]{0,3}".prop_map(Value::String), 0..3).prop_map(Value::Array),
    ]
}

// nested objects are never empty: an empty object has no leaves to flatten
fn arb_tree() -> impl Strategy<Value = Tree> {
    let node = arb_leaf().prop_recursive(3, 32, 4, |inner| {
        proptest::collection::btree_map(KEY, inner, 1..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    });
    proptest::collection::btree_map(KEY, node, 0..5).prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn flatten_then_unflatten_rebuilds_the_tree(tree in arb_tree()) {
        let rebuilt = unflatten(flatten_tree(&tree));
        prop_assert_eq!(rebuilt, tree);
    }

    #[test]
    fn saved_edits_show_up_after_rebuilding_the_catalog(
        common in arb_tree(),
        dotted in arb_tree(),
        edits in proptest::collection::vec((any::<usize>(), "[ -~]{0,6}"), 0..6),
    ) {
        let files = vec![
            TranslationFile::new("common", "common.json", common),
            TranslationFile::new("v1.2", "v1.2.json", dotted),
        ];
        let before = Catalog::build(&files);
        let ids: Vec<String> = before.iter().map(|e| e.id.clone()).collect();

        let mut changes = ChangeSet::new();
        let mut expected: HashMap<String, String> = HashMap::new();
        if !ids.is_empty() {
            for (pick, value) in &edits {
                let id = &ids[pick % ids.len()];
                changes.set_value(id, value, &before.get(id).unwrap().value);
                expected.insert(id.clone(), value.clone());
            }
        }

        let modified = apply_changes(&files, &changes);
        for file in &modified {
            let prefix = format!("{}.", file.file_name.replace('.', "\\."));
            prop_assert!(changes.iter().any(|c| c.id.starts_with(&prefix)));
        }
        let merged: Vec<TranslationFile> = files
            .iter()
            .map(|f| modified.iter().find(|m| m.file_name == f.file_name).unwrap_or(f).clone())
            .collect();
        let after = Catalog::build(&merged);

        prop_assert_eq!(after.len(), before.len());
        for entry in before.iter() {
            let now = &after.get(&entry.id).unwrap().value;
            match expected.get(&entry.id) {
                Some(value) => prop_assert_eq!(now, value),
                None => prop_assert_eq!(now, &entry.value),
            }
        }
    }
}
