//! Lesson records and row normalization
//!
//! [`normalize`] is a total function from a [`RawRow`] to a [`LessonRecord`]:
//! every field gets a value, missing text becomes `""` (or the title
//! placeholder) and numeric/flag columns go through explicit coercions.

use serde::Serialize;

use crate::csv::RawRow;

/// Title used when the sheet leaves `title` blank
pub const UNTITLED: &str = "Untitled";

/// The only cell value that turns a flag column on
pub const FLAG_TRUE: &str = "1";

/// Column names recognized in the lesson sheet
pub mod columns {
    pub const COURSE_ID: &str = "course_id";
    pub const LESSON_ID: &str = "lesson_id";
    pub const DAY_NUMBER: &str = "day_number";
    pub const TITLE: &str = "title";
    pub const SUBTITLE: &str = "subtitle";
    pub const PREVIEW_IMAGE_URL: &str = "preview_image_url";
    pub const VIDEO_URL: &str = "video_url";
    pub const CONTENT_HTML: &str = "content_html";
    pub const CONTENT_TEXT: &str = "content_text";
    pub const ATTACHMENTS: &str = "attachments";
    /// Lock flag from earlier sheet layouts
    pub const IS_LOCKED: &str = "is_locked";
}

/// A single lesson row after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonRecord {
    pub course_id: String,
    /// Stable id within a course. Duplicates are not rejected.
    pub lesson_id: String,
    pub day_number: u32,
    pub title: String,
    pub subtitle: String,
    pub preview_image_url: String,
    pub video_url: String,
    pub content_html: String,
    pub content_text: String,
    /// Raw pipe-delimited attachment list
    pub attachments: String,
    /// Authoring lock flag carried over from older sheets. Display only;
    /// accessibility is decided by the progression engine.
    pub is_locked: bool,
}

impl LessonRecord {
    /// Attachment links: split on `|`, trimmed, blanks dropped
    pub fn attachment_list(&self) -> Vec<&str> {
        self.attachments
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Coerce a `day_number` cell to a non-negative day
///
/// Blank or non-numeric text yields 0. Fractions truncate toward zero and
/// negative or non-finite values clamp to 0.
///
/// Only decimal notation is understood: `"0x10"` and `"Infinity"` both give
/// 0, unlike a JavaScript `Number()` coercion (16 and Infinity).
///
/// # Examples
///
/// ```
/// use cabinet_common::lesson::parse_day_number;
///
/// assert_eq!(parse_day_number("7"), 7);
/// assert_eq!(parse_day_number(""), 0);
/// assert_eq!(parse_day_number("day one"), 0);
/// assert_eq!(parse_day_number("2.9"), 2);
/// ```
pub fn parse_day_number(value: &str) -> u32 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => {
            if n >= u32::MAX as f64 {
                u32::MAX
            } else {
                n.trunc() as u32
            }
        }
        _ => 0,
    }
}

/// Coerce a flag cell: true only for an exact `"1"`
pub fn parse_flag(value: &str) -> bool {
    value == FLAG_TRUE
}

fn text_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Map a raw sheet row onto a [`LessonRecord`]
pub fn normalize(row: &RawRow) -> LessonRecord {
    LessonRecord {
        course_id: row.get(columns::COURSE_ID).to_string(),
        lesson_id: row.get(columns::LESSON_ID).to_string(),
        day_number: parse_day_number(row.get(columns::DAY_NUMBER)),
        title: text_or(row.get(columns::TITLE), UNTITLED),
        subtitle: row.get(columns::SUBTITLE).to_string(),
        preview_image_url: row.get(columns::PREVIEW_IMAGE_URL).to_string(),
        video_url: row.get(columns::VIDEO_URL).to_string(),
        content_html: row.get(columns::CONTENT_HTML).to_string(),
        content_text: row.get(columns::CONTENT_TEXT).to_string(),
        attachments: row.get(columns::ATTACHMENTS).to_string(),
        is_locked: parse_flag(row.get(columns::IS_LOCKED)),
    }
}
