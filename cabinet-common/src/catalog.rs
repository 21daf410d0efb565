//! Lesson catalog building
//!
//! Order of steps matters: every row is normalized first, then filtered by
//! course, then stably sorted by day so equal-day lessons keep sheet order.

use tracing::debug;

use crate::csv::{self, RawRow};
use crate::lesson::{self, LessonRecord};

/// Normalize, filter to `course_id` (exact match) and sort by day
pub fn build(rows: &[RawRow], course_id: &str) -> Vec<LessonRecord> {
    let mut lessons: Vec<LessonRecord> = rows
        .iter()
        .map(lesson::normalize)
        .filter(|lesson| lesson.course_id == course_id)
        .collect();

    // sort_by_key is stable
    lessons.sort_by_key(|lesson| lesson.day_number);

    debug!(
        "Built catalog for course '{}': {} of {} rows",
        course_id,
        lessons.len(),
        rows.len()
    );
    lessons
}

/// Parse sheet text and build the catalog for `course_id`
pub fn ingest(text: &str, course_id: &str) -> Vec<LessonRecord> {
    build(&csv::parse(text), course_id)
}

/// First lesson in catalog order with this id
pub fn find_lesson<'a>(catalog: &'a [LessonRecord], lesson_id: &str) -> Option<&'a LessonRecord> {
    catalog.iter().find(|lesson| lesson.lesson_id == lesson_id)
}
