use crate::errors::Result;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A translation tree: the top-level object of one translation file.
pub type Tree = Map<String, Value>;

/// Flattens every leaf of `tree` into a dot path, in document order.
///
/// Objects are traversed; everything else (arrays included) is a leaf.
/// Keys containing `.` or `\` are escaped so the path can be parsed back
/// with [`parse_dot_path`]. Empty nested objects have no leaves and so do
/// not appear in the output.
pub fn flatten_tree(tree: &Tree) -> IndexMap<String, Value> {
    let mut out = IndexMap::new();
    flatten_into(tree, None, &mut out);
    out
}

fn flatten_into(obj: &Tree, prefix: Option<&str>, out: &mut IndexMap<String, Value>) {
    for (k, val) in obj.iter() {
        let key = join_path(prefix, k);
        match val {
            Value::Object(child) => flatten_into(child, Some(&key), out),
            leaf => {
                out.insert(key, leaf.clone());
            }
        }
    }
}

/// Appends one raw key to an escaped dot path.
pub fn join_path(prefix: Option<&str>, key: &str) -> String {
    let seg = escape_key(key);
    match prefix {
        Some(p) => format!("{}.{}", p, seg),
        None => seg,
    }
}

pub fn escape_key(k: &str) -> String {
    k.replace('\\', "\\\\").replace('.', "\\.")
}

/// Splits a dot path into raw keys. `\x` stands for a literal `x`.
///
/// Empty segments are kept, so `"a..b"` addresses the key `""` under `a`.
pub fn parse_dot_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => buf.push(next),
                None => buf.push('\\'),
            },
            '.' => segments.push(std::mem::take(&mut buf)),
            _ => buf.push(c),
        }
    }
    segments.push(buf);
    segments
}

/// Splits a path on its first unescaped dot: the unescaped head and the
/// still-escaped remainder. `None` when the path has a single segment.
pub fn split_first_segment(path: &str) -> Option<(String, &str)> {
    let mut escaped = false;
    for (idx, c) in path.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '.' => {
                let head = parse_dot_path(&path[..idx]).concat();
                return Some((head, &path[idx + 1..]));
            }
            _ => {}
        }
    }
    None
}

/// Sets `value` at `path`, creating intermediate objects as needed.
///
/// Intermediate values that are not objects are replaced by empty objects.
/// Sibling keys at every level are left alone.
pub fn set_value_at_path(root: &mut Tree, path: &str, value: Value) {
    let mut segments = parse_dot_path(path);
    let last = segments.pop().unwrap_or_default();
    let mut current = root;
    for seg in segments {
        let slot = current
            .entry(seg)
            .or_insert_with(|| Value::Object(Map::new()));
        current = ensure_object(slot);
    }
    current.insert(last, value);
}

fn ensure_object(v: &mut Value) -> &mut Tree {
    if !v.is_object() {
        *v = Value::Object(Map::new());
    }
    match v {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

/// Rebuilds a tree from flattened `(path, value)` pairs.
pub fn unflatten<I>(pairs: I) -> Tree
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut tree = Tree::new();
    for (path, value) in pairs {
        set_value_at_path(&mut tree, &path, value);
    }
    tree
}

/// Serializes with 2-space indentation, adding one `\n` when asked.
pub fn render_json(tree: &Tree, trailing_newline: bool) -> Result<String> {
    let mut pretty = serde_json::to_string_pretty(tree)?;
    if trailing_newline {
        pretty.push('\n');
    }
    Ok(pretty)
}
