// ABOUTME: Long-slide splitting for the slidesmith application
// ABOUTME: Finds safe break points in oversize slides and rebuilds the deck

use crate::blocks::{self, BlockContext};
use crate::errors::Result;
use crate::slides::{self, SLIDE_SEPARATOR};
use crate::utils;
use log::{debug, info, warn};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// Options for splitting oversize slides
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// A slide with more lines than this is split into chunks of at most this many
    pub max_lines: usize,
    /// How many lines to look back for a blank line or heading once a chunk is full
    pub lookback: usize,
    /// Markers that open a multi-column container
    pub container_markers: Vec<String>,
    pub separator: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_lines: 40,
            lookback: 10,
            container_markers: blocks::default_container_markers(),
            separator: SLIDE_SEPARATOR.to_string(),
        }
    }
}

/// What happened to a single slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Within the line limit
    Untouched,
    Split {
        line_count: usize,
        chunks: Vec<String>,
        hard_splits: usize,
    },
    /// Oversize, but no break point outside a fence or container was found
    Unsplittable { line_count: usize },
}

/// Lines of one slide grouped into chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks<'a> {
    pub chunks: Vec<Vec<&'a str>>,
    /// Chunks cut mid-paragraph because no break line was in reach
    pub hard_splits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStatus {
    Split { slides: usize, hard_splits: usize },
    NotSplit,
}

/// Report line for one oversize slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideReport {
    /// 1-based position of the slide in the input document
    pub index: usize,
    pub line_count: usize,
    pub status: SplitStatus,
}

impl fmt::Display for SlideReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            SplitStatus::Split {
                slides,
                hard_splits: 0,
            } => write!(
                f,
                "Slide {}: split from {} lines into {} slides",
                self.index, self.line_count, slides
            ),
            SplitStatus::Split {
                slides,
                hard_splits,
            } => write!(
                f,
                "Slide {}: split from {} lines into {} slides ({} hard split{})",
                self.index,
                self.line_count,
                slides,
                hard_splits,
                if hard_splits == 1 { "" } else { "s" }
            ),
            SplitStatus::NotSplit => write!(
                f,
                "Slide {}: could not split {} lines (no break point outside code or columns)",
                self.index, self.line_count
            ),
        }
    }
}

/// Result of splitting a whole document
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub content: String,
    pub reports: Vec<SlideReport>,
}

impl SplitResult {
    /// Number of slides that were actually divided
    pub fn split_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, SplitStatus::Split { .. }))
            .count()
    }
}

fn is_break_line(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

/// Group lines into chunks of roughly `max_lines`.
///
/// A chunk is only closed where the block context is clear. Once a chunk is
/// full, the latest blank line or heading in the last `lookback` lines after
/// which the context was clear ends it; without one the chunk is cut at the
/// current line.
pub fn chunk_lines<'a>(lines: &[&'a str], options: &SplitOptions) -> Chunks<'a> {
    let mut ctx = BlockContext::new(&options.container_markers);
    let mut chunks: Vec<Vec<&'a str>> = Vec::new();
    let mut current: Vec<&'a str> = Vec::new();
    // clear_after[k]: context was clear right after current[k]
    let mut clear_after: Vec<bool> = Vec::new();
    let mut hard_splits = 0;

    for (i, &line) in lines.iter().enumerate() {
        ctx.observe(line);
        current.push(line);
        clear_after.push(ctx.is_clear());

        if current.len() < options.max_lines || !ctx.is_clear() {
            continue;
        }

        let floor = current
            .len()
            .saturating_sub(options.lookback)
            .max(1);
        let cut = (floor..current.len())
            .rev()
            .find(|&j| clear_after[j] && is_break_line(current[j]));

        match cut {
            Some(j) => {
                debug!("Breaking after line {} of chunk ({:?})", j + 1, current[j]);
                // the context was clear after line j, so the flags carried over stay valid
                let rest = current.split_off(j + 1);
                clear_after = clear_after.split_off(j + 1);
                chunks.push(std::mem::replace(&mut current, rest));
            }
            None => {
                if lines[i + 1..].iter().any(|l| !l.trim().is_empty()) {
                    hard_splits += 1;
                }
                chunks.push(std::mem::take(&mut current));
                clear_after.clear();
            }
        }
    }

    if !current.is_empty() {
        let blank_tail = current.iter().all(|l| l.trim().is_empty());
        match chunks.last_mut() {
            Some(last) if blank_tail => last.extend(current),
            _ => chunks.push(current),
        }
    }

    Chunks {
        chunks,
        hard_splits,
    }
}

/// Split one slide body if it is longer than `max_lines`
pub fn split_slide(slide: &str, options: &SplitOptions) -> SlideOutcome {
    let size = slides::measure(slide, options.max_lines);
    if !size.oversize {
        return SlideOutcome::Untouched;
    }

    let lines: Vec<&str> = slide.split('\n').collect();
    let grouped = chunk_lines(&lines, options);

    if grouped.chunks.len() < 2 {
        return SlideOutcome::Unsplittable {
            line_count: size.line_count,
        };
    }

    SlideOutcome::Split {
        line_count: size.line_count,
        chunks: grouped.chunks.iter().map(|c| c.join("\n")).collect(),
        hard_splits: grouped.hard_splits,
    }
}

/// Split every oversize slide of a document, keeping slide order
pub fn split_document(document: &str, options: &SplitOptions) -> SplitResult {
    let parts = slides::partition(document, &options.separator);
    let mut output: Vec<Cow<'_, str>> = Vec::with_capacity(parts.len());
    let mut reports = Vec::new();

    for (i, &slide) in parts.iter().enumerate() {
        match split_slide(slide, options) {
            SlideOutcome::Untouched => output.push(Cow::Borrowed(slide)),
            SlideOutcome::Unsplittable { line_count } => {
                warn!(
                    "Slide {} has {} lines but no safe break point",
                    i + 1,
                    line_count
                );
                output.push(Cow::Borrowed(slide));
                reports.push(SlideReport {
                    index: i + 1,
                    line_count,
                    status: SplitStatus::NotSplit,
                });
            }
            SlideOutcome::Split {
                line_count,
                chunks,
                hard_splits,
            } => {
                if hard_splits > 0 {
                    warn!(
                        "Slide {} needed {} hard split(s) without a blank line or heading",
                        i + 1,
                        hard_splits
                    );
                }
                reports.push(SlideReport {
                    index: i + 1,
                    line_count,
                    status: SplitStatus::Split {
                        slides: chunks.len(),
                        hard_splits,
                    },
                });
                output.extend(chunks.into_iter().map(Cow::Owned));
            }
        }
    }

    SplitResult {
        content: slides::reassemble(&output, &options.separator),
        reports,
    }
}

/// Split the oversize slides of a file in place
pub fn process_file(path: &Path, options: &SplitOptions) -> Result<SplitResult> {
    info!("Splitting long slides in {:?}", path);
    let original = utils::read_document(path)?;
    let result = split_document(&original, options);

    if result.content != original {
        utils::write_atomic(path, &result.content)?;
        info!("Rewrote {:?}", path);
    } else {
        debug!("No changes for {:?}", path);
    }

    Ok(result)
}
