//! Lesson unlocking and progress
//!
//! Accessibility is a pure projection of `(catalog, completion set)` and is
//! recomputed on every call. The gate is a day-number threshold, not a
//! position in the list:
//!
//! - `max_completed_day` is the highest day among completed lessons (0 if none)
//! - `unlock_threshold` is `max_completed_day + 1`
//! - a lesson is accessible iff `day_number <= unlock_threshold`
//!
//! With days `[1, 3, 5]` and day 1 completed the threshold is 2, so day 3
//! stays locked even though it is next in the list.

use std::collections::HashMap;

use serde::Serialize;

use crate::completion::CompletionSet;
use crate::lesson::LessonRecord;
use crate::{Error, Result};

/// Per-lesson accessibility derived from a catalog and completion set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityModel {
    pub max_completed_day: u32,
    pub unlock_threshold: u32,
    /// lesson_id -> accessible
    pub accessible: HashMap<String, bool>,
}

impl AccessibilityModel {
    /// Whether a lesson with this day number is open
    pub fn is_day_accessible(&self, day_number: u32) -> bool {
        day_number <= self.unlock_threshold
    }

    /// Accessibility by id; unknown ids are not accessible
    pub fn is_accessible(&self, lesson_id: &str) -> bool {
        self.accessible.get(lesson_id).copied().unwrap_or(false)
    }
}

/// Display state of one lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonState {
    Locked,
    Accessible,
    /// Always accessible as well
    Completed,
}

impl LessonState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::Accessible => "Open",
            Self::Completed => "Completed ✓",
        }
    }
}

/// Compute accessibility for every lesson in `catalog`
pub fn compute_accessibility(
    catalog: &[LessonRecord],
    completed: &CompletionSet,
) -> AccessibilityModel {
    let max_completed_day = catalog
        .iter()
        .filter(|lesson| completed.contains(&lesson.lesson_id))
        .map(|lesson| lesson.day_number)
        .max()
        .unwrap_or(0);
    let unlock_threshold = max_completed_day.saturating_add(1);

    // Duplicate ids: the first (lowest day) occurrence decides
    let mut accessible = HashMap::with_capacity(catalog.len());
    for lesson in catalog {
        accessible
            .entry(lesson.lesson_id.clone())
            .or_insert(lesson.day_number <= unlock_threshold);
    }

    AccessibilityModel {
        max_completed_day,
        unlock_threshold,
        accessible,
    }
}

/// State of a single lesson under `model`
pub fn lesson_state(
    lesson: &LessonRecord,
    model: &AccessibilityModel,
    completed: &CompletionSet,
) -> LessonState {
    if completed.contains(&lesson.lesson_id) {
        LessonState::Completed
    } else if model.is_day_accessible(lesson.day_number) {
        LessonState::Accessible
    } else {
        LessonState::Locked
    }
}

/// Look up a lesson for the detail view
///
/// Fails with [`Error::LessonNotFound`] for unknown ids and
/// [`Error::LessonLocked`] when the lesson's day is above the threshold.
pub fn open_lesson<'a>(
    catalog: &'a [LessonRecord],
    completed: &CompletionSet,
    lesson_id: &str,
) -> Result<&'a LessonRecord> {
    let lesson = crate::catalog::find_lesson(catalog, lesson_id)
        .ok_or_else(|| Error::LessonNotFound(lesson_id.to_string()))?;

    let model = compute_accessibility(catalog, completed);
    if !model.is_day_accessible(lesson.day_number) {
        return Err(Error::LessonLocked {
            lesson_id: lesson.lesson_id.clone(),
            day_number: lesson.day_number,
            unlock_threshold: model.unlock_threshold,
        });
    }
    Ok(lesson)
}

/// Completed/total counters for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed_count: usize,
    pub total: usize,
    /// Rounded percentage, 0 for an empty catalog
    pub percent: u32,
}

/// Count catalog lessons whose id is completed
pub fn progress_summary(catalog: &[LessonRecord], completed: &CompletionSet) -> ProgressSummary {
    let total = catalog.len();
    let completed_count = catalog
        .iter()
        .filter(|lesson| completed.contains(&lesson.lesson_id))
        .count();

    let percent = if total == 0 {
        0
    } else {
        (completed_count as f64 / total as f64 * 100.0).round() as u32
    };

    ProgressSummary {
        completed_count,
        total,
        percent,
    }
}
