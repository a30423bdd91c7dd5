use crate::editor::DEFAULT_SAVE_CONCURRENCY;
use crate::project::ProjectLayout;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "copyedit.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: Option<PathBuf>,
    pub locales_dir: PathBuf,
    pub language: String,
    pub manifest: PathBuf,
    pub save_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        let layout = ProjectLayout::default();
        Self {
            project: None,
            locales_dir: layout.locales_dir,
            language: layout.language,
            manifest: layout.manifest,
            save_concurrency: DEFAULT_SAVE_CONCURRENCY,
        }
    }
}

impl Config {
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout {
            locales_dir: self.locales_dir.clone(),
            language: self.language.clone(),
            manifest: self.manifest.clone(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(Path::new(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Reading config file {:?}", path))?;
    let cfg: Config = toml::from_str(&contents)
        .with_context(|| format!("Parsing config file {:?}", path))?;
    Ok(cfg)
}
