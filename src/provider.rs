use crate::catalog::TranslationFile;
use crate::errors::{CopyEditError, Result};
use crate::json_utils::{Tree, render_json};
use crate::project::{ProjectConfig, ProjectLayout, ProjectSession};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Host boundary: project selection plus listing, reading and writing of
/// translation files. Every file operation requires a selected project.
#[async_trait]
pub trait FileProvider: Send + Sync {
    /// `None` models a cancelled pick.
    async fn select_project(&mut self, root: Option<&Path>) -> Result<Option<ProjectConfig>>;

    fn current_project(&self) -> Option<&ProjectConfig>;

    /// Base names of the available files. Empty when the directory cannot be read.
    async fn list_files(&self) -> Result<Vec<String>>;

    async fn read_file(&self, file_name: &str) -> Result<TranslationFile>;

    async fn write_file(&self, file_name: &str, data: &Tree) -> Result<()>;
}

/// Reads and writes `<root>/<locales_dir>/<language>/<name>.json` on disk.
#[derive(Debug, Clone, Default)]
pub struct LocalFileProvider {
    session: ProjectSession,
}

impl LocalFileProvider {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { session: ProjectSession::new(layout) }
    }

    pub fn layout(&self) -> &ProjectLayout {
        self.session.layout()
    }

    fn file_path(&self, file_name: &str) -> Result<PathBuf> {
        let project = self.session.require()?;
        Ok(project.locales_path.join(format!("{}.json", file_name)))
    }
}

#[async_trait]
impl FileProvider for LocalFileProvider {
    async fn select_project(&mut self, root: Option<&Path>) -> Result<Option<ProjectConfig>> {
        self.session.select(root).await
    }

    fn current_project(&self) -> Option<&ProjectConfig> {
        self.session.current()
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        let project = self.session.require()?;
        let mut dir = match tokio::fs::read_dir(&project.locales_path).await {
            Ok(dir) => dir,
            Err(err) => {
                error!(?err, path = ?project.locales_path, "Reading locales directory failed");
                return Ok(Vec::new());
            }
        };

        let mut names = Vec::new();
        loop {
            let item = match dir.next_entry().await {
                Ok(Some(item)) => item,
                Ok(None) => break,
                Err(err) => {
                    error!(?err, path = ?project.locales_path, "Reading locales directory failed");
                    return Ok(Vec::new());
                }
            };
            let is_file = item.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            let name = item.file_name().to_string_lossy().into_owned();
            if let Some(stem) = name.strip_suffix(".json") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read_file(&self, file_name: &str) -> Result<TranslationFile> {
        let path = self.file_path(file_name)?;
        let contents = tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CopyEditError::FileNotFound { file: file_name.to_string() }
            } else {
                CopyEditError::FileRead { file: file_name.to_string(), source }
            }
        })?;
        let parsed: Value = serde_json::from_str(&contents)
            .map_err(|source| CopyEditError::FileParse { file: file_name.to_string(), source })?;
        let Value::Object(data) = parsed else {
            return Err(CopyEditError::NotAnObject { file: file_name.to_string() });
        };
        Ok(TranslationFile::new(file_name, self.layout().display_path(file_name), data))
    }

    async fn write_file(&self, file_name: &str, data: &Tree) -> Result<()> {
        let path = self.file_path(file_name)?;
        // a missing or unreadable file counts as "no trailing newline"
        let trailing_newline = tokio::fs::read_to_string(&path)
            .await
            .map(|s| s.ends_with('\n'))
            .unwrap_or(false);
        let contents = render_json(data, trailing_newline)?;

        // write beside the target, then swap it in; the original stays intact until the rename
        let tmp_path = path.with_extension("tmp");
        let written = match tokio::fs::write(&tmp_path, contents).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &path).await,
            Err(err) => Err(err),
        };
        if let Err(source) = written {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(CopyEditError::FileWrite { file: file_name.to_string(), source });
        }
        info!(file = %file_name, "Saved translation file");
        Ok(())
    }
}
