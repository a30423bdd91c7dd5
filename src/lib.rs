pub mod catalog;
pub mod changes;
pub mod config;
pub mod editor;
pub mod errors;
pub mod filter;
pub mod json_utils;
pub mod placeholders;
pub mod project;
pub mod provider;
pub mod reconcile;

pub use catalog::{Catalog, Entry, LeafKind, TranslationFile};
pub use changes::{ChangeSet, EditChange};
pub use editor::{Editor, LoadReport, SaveReport};
pub use errors::{CopyEditError, Result};
pub use filter::{FileFilter, FilterOptions, filter_entries};
pub use project::{ProjectConfig, ProjectLayout, ProjectSession};
pub use provider::{FileProvider, LocalFileProvider};
pub use reconcile::apply_changes;
