//! cabinet-cli library - command handlers for the `cabinet` binary
//!
//! Handlers return the text to print so they can be tested without a
//! terminal. Fatal load errors (missing source, failed fetch) are returned as
//! errors; a missing or locked lesson is reported as a [`LessonOutcome`].

use cabinet_common::config::CabinetConfig;
use cabinet_common::progression::{compute_accessibility, lesson_state, open_lesson};
use cabinet_common::source::fetch_csv;
use cabinet_common::storage::KeyValueStore;
use cabinet_common::{catalog, CompletionStore, Error, LessonRecord, Result};
use tracing::info;

pub mod logging;
pub mod render;

/// Fetch the sheet named by `config` and build the course catalog
pub async fn load_catalog(config: &CabinetConfig) -> Result<Vec<LessonRecord>> {
    let source = config.csv_source()?;
    let text = fetch_csv(&source).await?;
    let lessons = catalog::ingest(&text, &config.course_id);
    info!(
        "Loaded {} lessons for course '{}'",
        lessons.len(),
        config.course_id
    );
    Ok(lessons)
}

/// Result of opening a single lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOutcome {
    /// Rendered lesson page
    Shown(String),
    /// No lesson with that id in this course
    NotFound(String),
    /// Lesson exists but is above the unlock threshold
    Locked(String),
}

impl LessonOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Shown(text) | Self::NotFound(text) | Self::Locked(text) => text,
        }
    }
}

/// Dashboard page for the loaded catalog
pub fn dashboard<S: KeyValueStore>(
    config: &CabinetConfig,
    lessons: &[LessonRecord],
    store: &CompletionStore<S>,
) -> String {
    render::render_dashboard(
        &config.brand_name,
        &config.course_id,
        lessons,
        &store.load(),
    )
}

/// Lesson detail page, or the not-found / locked state
pub fn lesson<S: KeyValueStore>(
    lessons: &[LessonRecord],
    store: &CompletionStore<S>,
    lesson_id: &str,
) -> Result<LessonOutcome> {
    let completed = store.load();
    match open_lesson(lessons, &completed, lesson_id) {
        Ok(lesson) => {
            let model = compute_accessibility(lessons, &completed);
            let state = lesson_state(lesson, &model, &completed);
            Ok(LessonOutcome::Shown(render::render_lesson(lesson, state)))
        }
        Err(e @ Error::LessonNotFound(_)) => Ok(LessonOutcome::NotFound(e.to_string())),
        Err(e @ Error::LessonLocked { .. }) => Ok(LessonOutcome::Locked(e.to_string())),
        Err(e) => Err(e),
    }
}

/// Mark an accessible lesson completed
///
/// Missing and locked lessons are refused the same way [`lesson`] refuses to
/// show them.
pub fn complete<S: KeyValueStore>(
    lessons: &[LessonRecord],
    store: &CompletionStore<S>,
    lesson_id: &str,
) -> Result<LessonOutcome> {
    let completed = store.load();
    let lesson = match open_lesson(lessons, &completed, lesson_id) {
        Ok(lesson) => lesson,
        Err(e @ Error::LessonNotFound(_)) => return Ok(LessonOutcome::NotFound(e.to_string())),
        Err(e @ Error::LessonLocked { .. }) => return Ok(LessonOutcome::Locked(e.to_string())),
        Err(e) => return Err(e),
    };

    let message = if store.mark_completed(&lesson.lesson_id)? {
        format!("Completed ✓ {}", lesson.title)
    } else {
        format!("Already completed: {}", lesson.title)
    };
    Ok(LessonOutcome::Shown(message))
}

/// Clear all stored progress
pub fn reset<S: KeyValueStore>(store: &CompletionStore<S>) -> Result<String> {
    store.reset()?;
    Ok("Progress reset.".to_string())
}
