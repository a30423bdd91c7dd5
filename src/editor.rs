use crate::catalog::{Catalog, Entry, TranslationFile};
use crate::changes::ChangeSet;
use crate::errors::{CopyEditError, Result};
use crate::filter::{FilterOptions, filter_entries};
use crate::project::ProjectConfig;
use crate::provider::FileProvider;
use crate::reconcile::apply_changes;
use futures::{StreamExt, stream};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

pub const DEFAULT_SAVE_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    /// Files that could not be read or parsed; left out of the catalog.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

/// Owns the loaded files, the catalog derived from them and the pending edits.
pub struct Editor<P> {
    provider: P,
    files: Vec<TranslationFile>,
    catalog: Catalog,
    changes: ChangeSet,
    concurrency: usize,
}

impl<P: FileProvider> Editor<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            files: Vec::new(),
            catalog: Catalog::default(),
            changes: ChangeSet::new(),
            concurrency: DEFAULT_SAVE_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn project(&self) -> Option<&ProjectConfig> {
        self.provider.current_project()
    }

    pub fn files(&self) -> &[TranslationFile] {
        &self.files
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Picks a project. On success everything in memory is discarded and the
    /// new project is loaded; a cancelled or rejected pick changes nothing.
    pub async fn select_project(&mut self, root: Option<&Path>) -> Result<Option<LoadReport>> {
        match self.provider.select_project(root).await? {
            Some(_) => {
                self.discard();
                self.load().await.map(Some)
            }
            None => Ok(None),
        }
    }

    /// Reads every listed file. Unreadable files are skipped, not fatal.
    /// Pending edits are dropped.
    pub async fn load(&mut self) -> Result<LoadReport> {
        let names = self.provider.list_files().await?;
        let mut report = LoadReport::default();
        let mut files = Vec::with_capacity(names.len());
        for name in names {
            match self.provider.read_file(&name).await {
                Ok(file) => {
                    report.loaded.push(name);
                    files.push(file);
                }
                Err(err) => {
                    warn!(%err, file = %name, "Skipping unreadable translation file");
                    report.skipped.push(name);
                }
            }
        }

        self.files = files;
        self.catalog = Catalog::build(&self.files);
        self.changes.clear();

        let non_text = self.catalog.non_text_count();
        if non_text > 0 {
            warn!(count = non_text, "Non-text leaves found; edited values are saved as strings");
        }
        info!(
            files = report.loaded.len(),
            skipped = report.skipped.len(),
            entries = self.catalog.len(),
            "Loaded translation files"
        );
        Ok(report)
    }

    pub async fn refresh(&mut self) -> Result<LoadReport> {
        self.load().await
    }

    fn discard(&mut self) {
        self.files.clear();
        self.catalog = Catalog::default();
        self.changes.clear();
    }

    pub fn visible(&self, opts: &FilterOptions) -> Vec<&Entry> {
        filter_entries(&self.catalog, opts)
    }

    pub fn file_names(&self) -> Vec<String> {
        self.catalog.unique_file_names()
    }

    /// Records an edit against the loaded value. Returns whether the entry
    /// is pending afterwards.
    pub fn set_value(&mut self, id: &str, new_value: &str) -> Result<bool> {
        let entry = self
            .catalog
            .get(id)
            .ok_or_else(|| CopyEditError::UnknownEntry(id.to_string()))?;
        self.changes.set_value(id, new_value, &entry.value);
        Ok(self.changes.contains(id))
    }

    /// The pending value if there is one, otherwise the loaded value.
    pub fn current_value(&self, id: &str) -> Option<&str> {
        match self.changes.get(id) {
            Some(change) => Some(&change.new_value),
            None => self.catalog.get(id).map(|e| e.value.as_str()),
        }
    }

    /// Files that a save would write, with the edits applied.
    pub fn pending_files(&self) -> Vec<TranslationFile> {
        apply_changes(&self.files, &self.changes)
    }

    pub async fn save(&mut self) -> Result<SaveReport> {
        self.save_with(|_, _| {}).await
    }

    /// Writes every modified file, calling `observe` as each one finishes.
    ///
    /// Succeeds only if every write does; then the written trees replace the
    /// loaded ones and the pending edits are cleared. On failure nothing in
    /// memory changes and files already written stay written.
    pub async fn save_with<F>(&mut self, mut observe: F) -> Result<SaveReport>
    where
        F: FnMut(&str, &Result<()>),
    {
        let modified = self.pending_files();
        if modified.is_empty() {
            return Ok(SaveReport::default());
        }

        let provider = &self.provider;
        let outcomes: Vec<(TranslationFile, Result<()>)> = stream::iter(modified)
            .map(|file| async move {
                let res = provider.write_file(&file.file_name, &file.data).await;
                (file, res)
            })
            .buffer_unordered(self.concurrency)
            .inspect(|(file, res)| observe(&file.file_name, res))
            .collect()
            .await;

        let mut report = SaveReport::default();
        let mut saved = Vec::new();
        for (file, res) in outcomes {
            match res {
                Ok(()) => {
                    report.written.push(file.file_name.clone());
                    saved.push(file);
                }
                Err(err) => {
                    error!(%err, file = %file.file_name, "Saving translation file failed");
                    report.failed.push(file.file_name);
                }
            }
        }
        report.written.sort();
        report.failed.sort();

        if !report.failed.is_empty() {
            return Err(CopyEditError::SaveIncomplete {
                written: report.written,
                failed: report.failed,
            });
        }

        for file in saved {
            if let Some(slot) = self.files.iter_mut().find(|f| f.file_name == file.file_name) {
                *slot = file;
            }
        }
        self.catalog = Catalog::build(&self.files);
        self.changes.clear();
        info!(files = report.written.len(), "Saved changes");
        Ok(report)
    }
}
