// ABOUTME: Code block restoration for the slidesmith application
// ABOUTME: Refills emptied fences from a reference deck and refreshes their line ranges

use crate::errors::{DeckError, Result};
use crate::utils;
use log::{info, warn};
use regex::Regex;
use std::path::Path;

const FENCE: &str = "```";

/// Outcome of refilling the fences of one deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub content: String,
    /// Fences that received a reference block
    pub restored: usize,
    /// Blocks found in the reference deck
    pub available: usize,
}

/// Bodies of every "```lang" fence in `reference`, in order
pub fn extract_blocks(reference: &str, lang: &str) -> Vec<String> {
    let opener = format!("{}{}", FENCE, lang);
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in reference.split('\n') {
        let trimmed = line.trim();
        if let Some(body) = current.as_mut() {
            if trimmed == FENCE {
                blocks.push(body.join("\n"));
                current = None;
            } else {
                body.push(line);
            }
        } else if trimmed == opener {
            current = Some(Vec::new());
        }
    }

    if current.is_some() {
        warn!("Reference deck ends inside an unterminated {} fence", lang);
    }
    blocks
}

fn directive_fence(lang: &str) -> Result<Regex> {
    Regex::new(&format!(r"^```{} \{{1-\d+\}}$", regex::escape(lang)))
        .map_err(|e| DeckError::ValidationError(format!("Invalid language tag {:?}: {}", lang, e)))
}

fn ends_body(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == FENCE || trimmed == "---"
}

/// Replace the body of every "```lang {1-N}" fence with the next block.
///
/// The directive is rewritten to count the non-empty lines of the new body.
/// A fence missing its closing marker ends at the next slide separator, which
/// is kept. Fences left over once the blocks run out are not touched.
pub fn restore_blocks(target: &str, blocks: &[String], lang: &str) -> Result<Restored> {
    let opener = directive_fence(lang)?;
    let lines: Vec<&str> = target.split('\n').collect();
    let mut next_block = blocks.iter();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut restored = 0;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if opener.is_match(line.trim()) {
            if let Some(block) = next_block.next() {
                let indent = &line[..line.len() - line.trim_start().len()];
                let code_lines = block.lines().filter(|l| !l.trim().is_empty()).count();

                out.push(format!("{}{}{} {{1-{}}}", indent, FENCE, lang, code_lines));
                out.push(block.clone());
                out.push(format!("{}{}", indent, FENCE));

                i += 1;
                while i < lines.len() && !ends_body(lines[i]) {
                    i += 1;
                }
                if i < lines.len() && lines[i].trim() == FENCE {
                    i += 1;
                }
                restored += 1;
                continue;
            }
        }
        out.push(line.to_string());
        i += 1;
    }

    Ok(Restored {
        content: out.join("\n"),
        restored,
        available: blocks.len(),
    })
}

/// Restore the `lang` fences of `target` from `reference`, optionally copying
/// the result to a second location
pub fn process_files(
    reference: &Path,
    target: &Path,
    lang: &str,
    copy_to: Option<&Path>,
) -> Result<Restored> {
    let reference_content = utils::read_document(reference)?;
    let target_content = utils::read_document(target)?;

    let blocks = extract_blocks(&reference_content, lang);
    info!("Found {} {} blocks in {:?}", blocks.len(), lang, reference);

    let result = restore_blocks(&target_content, &blocks, lang)?;
    if result.content != target_content {
        utils::write_atomic(target, &result.content)?;
    }

    if let Some(dest) = copy_to {
        utils::write_atomic(dest, &result.content)?;
        info!("Copied {:?} to {:?}", target, dest);
    }

    Ok(result)
}
