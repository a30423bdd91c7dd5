use crate::catalog::{Catalog, Entry};
use std::fmt;
use std::str::FromStr;

/// Which file the table is restricted to. `"all"` means no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileFilter {
    #[default]
    All,
    Only(String),
}

impl FileFilter {
    fn admits(&self, file_name: &str) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Only(name) => name == file_name,
        }
    }
}

impl FromStr for FileFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => FileFilter::All,
            name => FileFilter::Only(name.to_string()),
        })
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFilter::All => f.write_str("all"),
            FileFilter::Only(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub search_term: String,
    pub selected_file: FileFilter,
}

impl FilterOptions {
    pub fn new(search_term: impl Into<String>, selected_file: FileFilter) -> Self {
        Self { search_term: search_term.into(), selected_file }
    }
}

/// Entries visible under `opts`, in catalog order.
///
/// A non-empty search term matches key, value or file name,
/// case-insensitively.
pub fn filter_entries<'a>(catalog: &'a Catalog, opts: &FilterOptions) -> Vec<&'a Entry> {
    let term = opts.search_term.to_lowercase();
    catalog
        .iter()
        .filter(|entry| opts.selected_file.admits(&entry.file_name))
        .filter(|entry| {
            term.is_empty()
                || entry.key.to_lowercase().contains(&term)
                || entry.value.to_lowercase().contains(&term)
                || entry.file_name.to_lowercase().contains(&term)
        })
        .collect()
}
