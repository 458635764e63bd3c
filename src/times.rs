// ABOUTME: Time annotation removal for the slidesmith application
// ABOUTME: Strips "(45분)" markers, schedule sections and timed bullets from decks

use crate::errors::Result;
use crate::utils;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Decks processed when no paths are given
pub const DEFAULT_PATTERN: &str = "src/slides/*/slides.md";

/// "(45분)", together with the whitespace before it
static MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d+분\)").unwrap());

/// A "## ⏰ ..." section, up to the next h2, separator or end of text.
/// The terminator is captured so it can be put back.
static SCHEDULE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)## ⏰.*?(\n## |\n---|\z)").unwrap());

/// "- **Lecture**: 45분 ..." bullet lines
static TIMED_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*- \*\*[^*\n]+\*\*:[ \t]*\d+분[^\n]*(?:\n|\z)").unwrap());

static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static TRAILING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

/// Remove time allocations from a deck. Text without any is returned as is.
pub fn strip_time_annotations(document: &str) -> String {
    let mut content = MINUTES.replace_all(document, "").into_owned();

    // The terminator of one section may start the next one
    while SCHEDULE_SECTION.is_match(&content) {
        content = SCHEDULE_SECTION.replace_all(&content, "${1}").into_owned();
    }

    content = TIMED_BULLET.replace_all(&content, "").into_owned();
    content = EXTRA_BLANK_LINES.replace_all(&content, "\n\n").into_owned();
    TRAILING_WHITESPACE.replace_all(&content, "").into_owned()
}

/// Strip time annotations from a file in place. Returns whether it changed.
pub fn process_file(path: &Path) -> Result<bool> {
    let original = utils::read_document(path)?;
    let stripped = strip_time_annotations(&original);

    if stripped == original {
        debug!("No time annotations in {:?}", path);
        return Ok(false);
    }

    utils::write_atomic(path, &stripped)?;
    info!("Removed time annotations from {:?}", path);
    Ok(true)
}
