//! End-to-end tests: sheet text -> catalog -> completions -> accessibility
//!
//! Uses the JSON file store in a temp directory so persistence goes through
//! the same path the CLI uses.

use cabinet_common::catalog;
use cabinet_common::completion::{CompletionStore, LEGACY_KEY, PRIMARY_KEY};
use cabinet_common::progression::{
    compute_accessibility, lesson_state, open_lesson, progress_summary,
};
use cabinet_common::storage::{JsonFileStore, KeyValueStore};
use cabinet_common::{Error, LessonState};
use tempfile::TempDir;

const SHEET: &str = concat!(
    "course_id,lesson_id,day_number,title,subtitle,preview_image_url,video_url,content_html,content_text,attachments\r\n",
    "course_alpha,a5,5,Fifth,,,,,,\r\n",
    "course_alpha,a1,1,\"Intro, part \"\"one\"\"\",Start here,,,\"<p>line 1\nline 2</p>\",,https://x.example/a.pdf|https://x.example/b.pdf\r\n",
    "course_beta,b1,1,Other course,,,,,,\r\n",
    ",,,,,,,,,\r\n",
    "course_alpha,a3,3,Third,,,,,,\r\n",
    "course_alpha,a3b,3,Third bis,,,,,,\r\n",
);

fn store_in(dir: &TempDir) -> CompletionStore<JsonFileStore> {
    CompletionStore::new(JsonFileStore::in_folder(dir.path()))
}

#[test]
fn test_ingest_sheet() {
    let lessons = catalog::ingest(SHEET, "course_alpha");
    let ids: Vec<_> = lessons.iter().map(|l| l.lesson_id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a3", "a3b", "a5"]);

    let intro = &lessons[0];
    assert_eq!(intro.title, "Intro, part \"one\"");
    assert_eq!(intro.content_html, "<p>line 1\nline 2</p>");
    assert_eq!(intro.attachment_list().len(), 2);
}

#[test]
fn test_sorted_non_decreasing() {
    let lessons = catalog::ingest(SHEET, "course_alpha");
    assert!(lessons.windows(2).all(|w| w[0].day_number <= w[1].day_number));
}

#[test]
fn test_progression_through_completion_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let lessons = catalog::ingest(SHEET, "course_alpha");

    let model = compute_accessibility(&lessons, &store.load());
    assert_eq!(model.unlock_threshold, 1);
    assert!(model.is_accessible("a1"));
    assert!(!model.is_accessible("a3"));

    store.mark_completed("a1").unwrap();
    let done = store.load();
    let model = compute_accessibility(&lessons, &done);
    assert_eq!(model.unlock_threshold, 2);
    assert!(!model.is_accessible("a3"));
    assert!(matches!(
        open_lesson(&lessons, &done, "a3"),
        Err(Error::LessonLocked { .. })
    ));
    assert_eq!(lesson_state(&lessons[0], &model, &done), LessonState::Completed);

    let summary = progress_summary(&lessons, &done);
    assert_eq!((summary.completed_count, summary.total, summary.percent), (1, 4, 25));
}

#[test]
fn test_completions_survive_reopen_and_reset() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).mark_completed("a1").unwrap();
    store_in(&dir).mark_completed("a1").unwrap();

    let reopened = store_in(&dir);
    let loaded = reopened.load();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains("a1"));

    reopened.reset().unwrap();
    assert!(store_in(&dir).load().is_empty());
}

#[test]
fn test_legacy_only_data_is_read_and_migrated() {
    let dir = TempDir::new().unwrap();
    let kv = JsonFileStore::in_folder(dir.path());
    kv.set(LEGACY_KEY, r#"["a","b"]"#).unwrap();

    let store = CompletionStore::new(kv.clone());
    let loaded = store.load();
    assert!(loaded.contains("a") && loaded.contains("b"));

    store.mark_completed("c").unwrap();
    assert_eq!(kv.get(PRIMARY_KEY).as_deref(), Some(r#"["a","b","c"]"#));
    assert_eq!(kv.get(LEGACY_KEY), kv.get(PRIMARY_KEY));
}

#[test]
fn test_malformed_stored_value_reads_empty() {
    let dir = TempDir::new().unwrap();
    let kv = JsonFileStore::in_folder(dir.path());
    kv.set(PRIMARY_KEY, "{not json").unwrap();

    let store = CompletionStore::new(kv);
    assert!(store.load().is_empty());
}
