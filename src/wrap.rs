// ABOUTME: Long-line wrapping for the slidesmith application
// ABOUTME: Wraps prose inside two-column layouts so columns do not scroll sideways

use crate::blocks::{is_fence, BlockContext};
use crate::errors::Result;
use crate::utils;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Options for wrapping lines in two-column layouts
#[derive(Debug, Clone)]
pub struct WrapOptions {
    /// Longest line, in characters, left as it is
    pub max_width: usize,
    /// Markers that open a container whose lines get wrapped
    pub container_markers: Vec<String>,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            max_width: 70,
            container_markers: vec!["grid-cols-2".to_string()],
        }
    }
}

/// A backtick pair around non-empty text
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());

/// Leading indentation, then an optional bullet and `**Label**:` label
static LINE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)((?:[-*+][ \t]+)?(?:\*\*[^*]+\*\*:[ \t]*)?)").unwrap());

const SENTENCE_ENDINGS: &[&str] = &[". ", "! ", "? ", "。"];

fn width(text: &str) -> usize {
    text.chars().count()
}

fn is_literal(line: &str) -> bool {
    let trimmed = line.trim_start();
    is_fence(line)
        || trimmed.starts_with('#')
        || trimmed.starts_with('|')
        || line.starts_with("    ")
        || line.starts_with('\t')
}

/// Wrap one line at `max_width` characters, breaking only between words.
///
/// Headings, table rows, fences, indented literal lines, lines with inline
/// code and lines that already read as several sentences come back unchanged.
/// Continuation lines get the original indentation plus two spaces.
pub fn wrap_line(line: &str, max_width: usize) -> String {
    if width(line) <= max_width || is_literal(line) || INLINE_CODE.is_match(line) {
        return line.to_string();
    }

    let (indent, prefix_end) = match LINE_PREFIX.captures(line) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(0).map_or(0, |m| m.end()),
        ),
        None => ("", 0),
    };
    let prefix = &line[..prefix_end];
    let body = &line[prefix_end..];

    if SENTENCE_ENDINGS.iter().any(|p| body.contains(p)) {
        return line.to_string();
    }

    let mut words = body.split_whitespace();
    let first = match words.next() {
        Some(word) => word,
        None => return line.to_string(),
    };

    let continuation = format!("{}  ", indent);
    let mut wrapped = Vec::new();
    let mut current = format!("{}{}", prefix, first);

    for word in words {
        if width(&current) + 1 + width(word) <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            wrapped.push(current);
            current = format!("{}{}", continuation, word);
        }
    }
    wrapped.push(current);

    wrapped.join("\n")
}

/// Wrap the long lines of every matching container outside code fences
pub fn wrap_document(document: &str, options: &WrapOptions) -> String {
    let mut ctx = BlockContext::new(&options.container_markers);
    let mut out = Vec::new();

    for line in document.split('\n') {
        let wrappable = ctx.in_container() && !ctx.in_fence();
        ctx.observe(line);

        if wrappable {
            out.push(wrap_line(line, options.max_width));
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

/// Wrap long lines of a file in place. Returns whether the file changed.
pub fn process_file(path: &Path, options: &WrapOptions) -> Result<bool> {
    info!("Wrapping long lines in {:?}", path);
    let original = utils::read_document(path)?;
    let wrapped = wrap_document(&original, options);

    if wrapped == original {
        debug!("No long lines to wrap in {:?}", path);
        return Ok(false);
    }

    utils::write_atomic(path, &wrapped)?;
    Ok(true)
}
