//! Plain-text rendering of the dashboard and lesson pages

use std::fmt::Write;

use cabinet_common::progression::{compute_accessibility, lesson_state, progress_summary};
use cabinet_common::{CompletionSet, LessonRecord, LessonState};

/// Shown when the configured course has no rows
pub const NO_LESSONS_MESSAGE: &str =
    "No lessons found for this course_id. Check the config file or sheet rows.";

/// Shown when a lesson has neither HTML nor text content
pub const EMPTY_CONTENT_MESSAGE: &str = "Lesson content is empty.";

fn day_label(day_number: u32) -> String {
    if day_number == 0 {
        "Day -".to_string()
    } else {
        format!("Day {}", day_number)
    }
}

/// Links that are not plain http(s) are replaced with `#`
pub fn safe_link(url: &str) -> &str {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url
    } else {
        "#"
    }
}

/// Lesson list with status badges and the progress counter
pub fn render_dashboard(
    brand_name: &str,
    course_id: &str,
    catalog: &[LessonRecord],
    completed: &CompletionSet,
) -> String {
    let mut out = String::new();
    let summary = progress_summary(catalog, completed);

    let _ = writeln!(out, "{} · {}", brand_name, course_id);
    let _ = writeln!(
        out,
        "{}/{} lessons completed ({}%)",
        summary.completed_count, summary.total, summary.percent
    );
    let _ = writeln!(out);

    if catalog.is_empty() {
        let _ = writeln!(out, "{}", NO_LESSONS_MESSAGE);
        return out;
    }

    let model = compute_accessibility(catalog, completed);
    for lesson in catalog {
        let state = lesson_state(lesson, &model, completed);
        let subtitle = if lesson.subtitle.is_empty() {
            "No description"
        } else {
            lesson.subtitle.as_str()
        };
        let _ = writeln!(
            out,
            "{:<8} {:<12} {}  [{}]",
            day_label(lesson.day_number),
            state.label(),
            lesson.title,
            lesson.lesson_id
        );
        let _ = writeln!(out, "{:<8} {:<12} {}", "", "", subtitle);
    }
    out
}

/// Lesson detail page for an accessible lesson
pub fn render_lesson(lesson: &LessonRecord, state: LessonState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} · {}", day_label(lesson.day_number), lesson.title);
    if !lesson.subtitle.is_empty() {
        let _ = writeln!(out, "{}", lesson.subtitle);
    }
    let _ = writeln!(out);

    let content = if !lesson.content_html.is_empty() {
        lesson.content_html.as_str()
    } else if !lesson.content_text.is_empty() {
        lesson.content_text.as_str()
    } else {
        EMPTY_CONTENT_MESSAGE
    };
    let _ = writeln!(out, "{}", content);

    if lesson.video_url.to_ascii_lowercase().starts_with("https://") {
        let _ = writeln!(out);
        let _ = writeln!(out, "Video: {}", lesson.video_url);
    }

    let attachments = lesson.attachment_list();
    if !attachments.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Attachments:");
        for (i, url) in attachments.iter().enumerate() {
            let _ = writeln!(out, "  Attachment {}: {}", i + 1, safe_link(url));
        }
    }

    let _ = writeln!(out);
    match state {
        LessonState::Completed => {
            let _ = writeln!(out, "{}", state.label());
        }
        _ => {
            let _ = writeln!(
                out,
                "Run `cabinet complete {}` to mark this lesson completed.",
                lesson.lesson_id
            );
        }
    }
    out
}
