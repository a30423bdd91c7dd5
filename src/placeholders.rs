use regex::Regex;
use std::sync::LazyLock;

// Patterns: {{mustache}}, {name}, {0}, :named, %s, %d
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\{\{[^}]+\}\}",
        r"\{[^{}]+\}",
        r":[A-Za-z_][A-Za-z0-9_]*",
        r"%[sd]",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Interpolation placeholders in `s`, first occurrence order, no duplicates.
pub fn extract_placeholders(s: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut taken: Vec<(usize, usize)> = Vec::new();
    for re in PATTERNS.iter() {
        for m in re.find_iter(s) {
            // `{name}` inside an already matched `{{name}}` is not a second placeholder
            if taken.iter().any(|&(start, end)| m.start() >= start && m.end() <= end) {
                continue;
            }
            taken.push((m.start(), m.end()));
            let p = m.as_str().to_string();
            if !out.contains(&p) {
                out.push(p);
            }
        }
    }
    out
}

/// Placeholders of `original` that `edited` no longer contains.
pub fn missing_placeholders(original: &str, edited: &str) -> Vec<String> {
    let kept = extract_placeholders(edited);
    extract_placeholders(original)
        .into_iter()
        .filter(|p| !kept.contains(p))
        .collect()
}
