//! # Cabinet Common Library
//!
//! Shared code for the course cabinet including:
//! - CSV parsing of the exported lesson sheet
//! - Lesson normalization and catalog building
//! - Completion persistence over a key-value store
//! - Lesson unlocking and progress counters
//! - CSV acquisition and configuration loading

pub mod catalog;
pub mod completion;
pub mod config;
pub mod csv;
pub mod error;
pub mod lesson;
pub mod progression;
pub mod source;
pub mod storage;

pub use completion::{CompletionSet, CompletionStore};
pub use error::{Error, Result};
pub use lesson::LessonRecord;
pub use progression::{AccessibilityModel, LessonState, ProgressSummary};
