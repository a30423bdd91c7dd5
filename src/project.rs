use crate::errors::{CopyEditError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where translation files and the manifest live, relative to a project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    pub locales_dir: PathBuf,
    pub language: String,
    pub manifest: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("public/locales"),
            language: "en".to_string(),
            manifest: PathBuf::from("package.json"),
        }
    }
}

impl ProjectLayout {
    /// Translations directory relative to the project root.
    pub fn relative_locales_path(&self) -> PathBuf {
        self.locales_dir.join(&self.language)
    }

    /// Display path of one translation file.
    pub fn display_path(&self, file_name: &str) -> PathBuf {
        self.relative_locales_path().join(format!("{}.json", file_name))
    }
}

/// A validated project. Immutable; re-selection replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub project_path: PathBuf,
    pub locales_path: PathBuf,
    pub project_name: String,
}

pub async fn validate_project(root: &Path, layout: &ProjectLayout) -> Result<ProjectConfig> {
    let invalid = |reason: String| CopyEditError::ProjectValidation {
        path: root.to_path_buf(),
        reason,
    };

    let locales_path = root.join(layout.relative_locales_path());
    let manifest_path = root.join(&layout.manifest);

    let is_dir = tokio::fs::metadata(&locales_path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(invalid(format!("missing translations directory {:?}", locales_path)));
    }

    let manifest = tokio::fs::read_to_string(&manifest_path)
        .await
        .map_err(|e| invalid(format!("reading {:?}: {}", manifest_path, e)))?;
    let manifest: Value = serde_json::from_str(&manifest)
        .map_err(|e| invalid(format!("parsing {:?}: {}", manifest_path, e)))?;

    let project_name = manifest
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "Untitled project".to_string());

    Ok(ProjectConfig {
        project_path: root.to_path_buf(),
        locales_path,
        project_name,
    })
}

/// Holds the currently selected project, if any.
#[derive(Debug, Clone, Default)]
pub struct ProjectSession {
    layout: ProjectLayout,
    current: Option<ProjectConfig>,
}

impl ProjectSession {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout, current: None }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Validates `root` and makes it current. `None` is a cancelled pick and
    /// leaves the session as it was; so does a failed validation.
    pub async fn select(&mut self, root: Option<&Path>) -> Result<Option<ProjectConfig>> {
        let Some(root) = root else {
            return Ok(None);
        };
        let project = validate_project(root, &self.layout).await?;
        info!(name = %project.project_name, path = ?project.project_path, "Project selected");
        self.current = Some(project.clone());
        Ok(Some(project))
    }

    pub fn current(&self) -> Option<&ProjectConfig> {
        self.current.as_ref()
    }

    pub fn require(&self) -> Result<&ProjectConfig> {
        self.current.as_ref().ok_or(CopyEditError::NoProjectSelected)
    }
}
