use copyedit::{
    CopyEditError, Editor, FileFilter, FilterOptions, LocalFileProvider, ProjectLayout,
};
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const COMMON: &str = "{\n  \"nav\": {\n    \"home\": \"Home\",\n    \"about\": \"About Us\"\n  }\n}\n";
// odd formatting on purpose: an untouched file must survive byte for byte
const ERRORS: &str = "{ \"notFound\":\"Not found\",\n    \"common\": {\"submit\": \"Submit\"} }";

fn project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name": "site"}"#).unwrap();
    let loc = dir.path().join("public/locales/en");
    fs::create_dir_all(&loc).unwrap();
    fs::write(loc.join("common.json"), COMMON).unwrap();
    fs::write(loc.join("errors.json"), ERRORS).unwrap();
    (dir, loc)
}

async fn open(dir: &TempDir) -> Editor<LocalFileProvider> {
    let mut editor = Editor::new(LocalFileProvider::new(ProjectLayout::default()));
    editor.select_project(Some(dir.path())).await.unwrap();
    editor
}

fn read_json(path: PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn edit_save_and_reload_round_trip() {
    let (dir, loc) = project();
    let mut editor = open(&dir).await;
    assert_eq!(editor.catalog().get("common.nav.home").unwrap().value, "Home");
    assert_eq!(editor.catalog().get("errors.common.submit").unwrap().value, "Submit");

    assert!(editor.set_value("common.nav.home", "Start").unwrap());
    let report = editor.save().await.unwrap();
    assert_eq!(report.written, vec!["common"]);

    assert_eq!(
        fs::read_to_string(loc.join("common.json")).unwrap(),
        "{\n  \"nav\": {\n    \"home\": \"Start\",\n    \"about\": \"About Us\"\n  }\n}\n"
    );
    assert_eq!(fs::read_to_string(loc.join("errors.json")).unwrap(), ERRORS);

    let mut reopened = open(&dir).await;
    reopened.refresh().await.unwrap();
    let catalog = reopened.catalog();
    assert_eq!(catalog.get("common.nav.home").unwrap().value, "Start");
    assert_eq!(catalog.get("common.nav.about").unwrap().value, "About Us");
    assert_eq!(catalog.get("errors.notFound").unwrap().value, "Not found");
}

#[tokio::test]
async fn reverted_edit_leaves_disk_alone() {
    let (dir, loc) = project();
    let mut editor = open(&dir).await;
    editor.set_value("common.nav.home", "Start").unwrap();
    editor.set_value("common.nav.home", "Home").unwrap();
    let report = editor.save().await.unwrap();
    assert!(report.written.is_empty());
    assert_eq!(fs::read_to_string(loc.join("common.json")).unwrap(), COMMON);
}

#[tokio::test]
async fn broken_file_is_skipped_and_others_still_load() {
    let (dir, loc) = project();
    fs::write(loc.join("broken.json"), "{").unwrap();
    let mut editor = Editor::new(LocalFileProvider::new(ProjectLayout::default()));
    let report = editor.select_project(Some(dir.path())).await.unwrap().unwrap();
    assert_eq!(report.skipped, vec!["broken"]);
    assert_eq!(editor.file_names(), vec!["common", "errors"]);
}

#[tokio::test]
async fn filter_over_loaded_project() {
    let (dir, _) = project();
    let editor = open(&dir).await;
    let hits = editor.visible(&FilterOptions::new("SUB", FileFilter::Only("errors".into())));
    let ids: Vec<_> = hits.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["errors.common.submit"]);
    assert_eq!(editor.visible(&FilterOptions::default()).len(), 4);
}

#[tokio::test]
async fn failed_write_reports_and_keeps_pending_changes() {
    let (dir, loc) = project();
    let mut editor = open(&dir).await;
    editor.set_value("common.nav.home", "Start").unwrap();
    editor.set_value("errors.notFound", "Missing").unwrap();

    // a directory squatting on the target path makes the write fail
    fs::remove_file(loc.join("errors.json")).unwrap();
    fs::create_dir(loc.join("errors.json")).unwrap();

    let (written, failed) = match editor.save().await.unwrap_err() {
        CopyEditError::SaveIncomplete { written, failed } => (written, failed),
        other => panic!("unexpected error: {other}"),
    };
    assert_eq!(written, vec!["common"]);
    assert_eq!(failed, vec!["errors"]);
    assert_eq!(read_json(loc.join("common.json"))["nav"]["home"], json!("Start"));
    assert_eq!(editor.changes().len(), 2);
}
