use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use copyedit::config::load_config;
use copyedit::placeholders::missing_placeholders;
use copyedit::{CopyEditError, Editor, Entry, FileFilter, FilterOptions, LocalFileProvider};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "copyedit", version, about = "Browse and edit JSON translation files")]
pub struct Cli {
    /// Project root (overrides COPYEDIT_PROJECT and copyedit.toml)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the selected project and its translation files
    Info,
    /// List translation files with their entry counts
    Files,
    /// Search entries by key, value or file name
    Search(SearchArgs),
    /// Edit one or more entries and save the affected files
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive text to look for (empty shows everything)
    pub term: Option<String>,
    /// Restrict to one file name, or "all"
    #[arg(long, default_value = "all")]
    pub file: FileFilter,
    /// Print entries as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Edits as ID VALUE pairs, e.g. common.nav.home Start
    #[arg(required = true, value_name = "ID VALUE")]
    pub edits: Vec<String>,
    /// Show planned changes without writing
    #[arg(long)]
    pub dry_run: bool,
}

async fn open_editor(project: Option<PathBuf>) -> Result<Editor<LocalFileProvider>> {
    let cfg = load_config()?;
    let root = project
        .or_else(|| env::var_os("COPYEDIT_PROJECT").map(PathBuf::from))
        .or_else(|| cfg.project.clone());
    let Some(root) = root else {
        return Err(anyhow::Error::new(CopyEditError::NoProjectSelected)
            .context("Pass --project, set COPYEDIT_PROJECT or add `project` to copyedit.toml"));
    };

    let mut editor =
        Editor::new(LocalFileProvider::new(cfg.layout())).with_concurrency(cfg.save_concurrency);
    let report = editor
        .select_project(Some(&root))
        .await
        .with_context(|| format!("Opening project {:?}", root))?;
    if let Some(report) = report {
        if !report.skipped.is_empty() {
            warn!(skipped = ?report.skipped, "Some translation files could not be loaded");
        }
    }
    Ok(editor)
}

pub async fn handle_info(project: Option<PathBuf>) -> Result<()> {
    let editor = open_editor(project).await?;
    let current = editor
        .project()
        .ok_or_else(|| anyhow!(CopyEditError::NoProjectSelected))?;
    println!("{}", current.project_name);
    println!("  root:    {}", current.project_path.display());
    println!("  locales: {}", current.locales_path.display());
    println!("  files:   {}", editor.files().len());
    println!("  entries: {}", editor.catalog().len());
    Ok(())
}

pub async fn handle_files(project: Option<PathBuf>) -> Result<()> {
    let editor = open_editor(project).await?;
    for name in editor.file_names() {
        let count = editor.catalog().iter().filter(|e| e.file_name == name).count();
        println!("{}.json\t{}", name, count);
    }
    Ok(())
}

pub async fn handle_search(project: Option<PathBuf>, args: SearchArgs) -> Result<()> {
    let editor = open_editor(project).await?;
    let opts = FilterOptions::new(args.term.unwrap_or_default(), args.file);
    let mut entries: Vec<&Entry> = editor.visible(&opts);
    entries.sort_by(|a, b| a.id.cmp(&b.id));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for entry in &entries {
        println!("{}\t{}\t{}", entry.id, entry.value, entry.file_name);
    }
    println!("\n{} entries", entries.len());
    Ok(())
}

fn pair_edits(raw: &[String]) -> Result<Vec<(&str, &str)>> {
    if raw.len() % 2 != 0 {
        return Err(anyhow!("Expected ID VALUE pairs, {:?} has no value", raw[raw.len() - 1]));
    }
    Ok(raw
        .chunks_exact(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect())
}

pub async fn handle_set(project: Option<PathBuf>, args: SetArgs) -> Result<()> {
    let mut editor = open_editor(project).await?;

    for (id, value) in pair_edits(&args.edits)? {
        let original = editor
            .catalog()
            .get(id)
            .map(|e| e.value.clone())
            .ok_or_else(|| anyhow!("Unknown entry {:?}; use `copyedit search` to find ids", id))?;
        let missing = missing_placeholders(&original, value);
        if !missing.is_empty() {
            warn!(id = %id, ?missing, "Edit drops placeholders");
        }
        if !editor.set_value(id, value)? {
            info!(id = %id, "Value matches the file, nothing to change");
        }
    }

    if editor.changes().is_empty() {
        println!("No changes to save");
        return Ok(());
    }

    if args.dry_run {
        let mut changes: Vec<_> = editor.changes().iter().collect();
        changes.sort_by(|a, b| a.id.cmp(&b.id));
        for c in changes {
            println!("{}: {:?} -> {:?}", c.id, c.original_value, c.new_value);
        }
        let files: Vec<_> = editor
            .pending_files()
            .into_iter()
            .map(|f| f.file_path.display().to_string())
            .collect();
        println!("Would write: {}", files.join(", "));
        return Ok(());
    }

    let change_count = editor.changes().len();
    let pb = ProgressBar::new(editor.pending_files().len() as u64);
    pb.set_style(ProgressStyle::with_template("{msg} {bar:40.cyan/blue} {pos}/{len}")?.progress_chars("##-"));
    pb.set_message("Saving");
    let result = editor.save_with(|_, _| pb.inc(1)).await;
    pb.finish_and_clear();
    let report = result.context("Failed to save changes. Please try again.")?;

    let written: Vec<_> = report.written.iter().map(|n| format!("{}.json", n)).collect();
    println!("Saved {} change(s) to {}", change_count, written.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_keep_equals_signs_in_ids_and_values() {
        let raw = args(&["common.a=b", "x=y", "errors.ok", "fine"]);
        let pairs = pair_edits(&raw).unwrap();
        assert_eq!(pairs, vec![("common.a=b", "x=y"), ("errors.ok", "fine")]);
    }

    #[test]
    fn dangling_id_is_rejected() {
        let raw = args(&["common.a", "b", "common.c"]);
        let err = pair_edits(&raw).unwrap_err();
        assert!(err.to_string().contains("common.c"));
    }

    #[test]
    fn set_command_parses_pairs() {
        let cli = Cli::try_parse_from(["copyedit", "set", "common.q=1", "Start", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Set(set) => {
                assert_eq!(set.edits, vec!["common.q=1", "Start"]);
                assert!(set.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
