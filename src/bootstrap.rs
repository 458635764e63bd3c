// ABOUTME: Course index generation for the slidesmith application
// ABOUTME: Scans weekly slide folders and renders index.html with the reveal.js viewer

use crate::errors::Result;
use crate::utils;
use comrak::{markdown_to_html, ComrakOptions};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// `week03` or `week03-some-topic`
static WEEK_DIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^week(\d{2})(?:-.*)?$").unwrap());

/// Options for generating the course index
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub site_title: String,
    pub reveal_version: String,
    /// Heading in `summary.md` whose section becomes the card description
    pub objectives_heading: String,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            site_title: "HCI/HMI Lecture".to_string(),
            reveal_version: "5.0.4".to_string(),
            objectives_heading: "## 🎯 학습 목표".to_string(),
        }
    }
}

/// Metadata of one week folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekInfo {
    /// Two-digit week number, e.g. "03"
    pub number: String,
    pub dir_name: String,
    pub title: String,
    pub description: String,
    pub has_slides: bool,
    pub has_code: bool,
    pub has_images: bool,
}

impl WeekInfo {
    fn placeholder(number: &str, dir_name: &str) -> Self {
        Self {
            number: number.to_string(),
            dir_name: dir_name.to_string(),
            title: format!("Week {}", number),
            description: "No description available".to_string(),
            has_slides: false,
            has_code: false,
            has_images: false,
        }
    }

    /// Short status marks for console output
    pub fn status_marks(&self) -> String {
        let mut marks = String::new();
        if self.has_slides {
            marks.push_str("📄");
        }
        if self.has_code {
            marks.push_str("💻");
        }
        if self.has_images {
            marks.push_str("🖼️");
        }
        if marks.is_empty() {
            marks.push_str("📋");
        }
        marks
    }
}

/// Title and description found in a `summary.md`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryInfo {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Find every `weekNN` folder under `slides_dir`, sorted by week number
pub fn scan_weeks(slides_dir: &Path, options: &BootstrapOptions) -> Vec<WeekInfo> {
    let entries = match fs::read_dir(slides_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Slides directory not readable at {:?}: {}", slides_dir, e);
            return Vec::new();
        }
    };

    let mut weeks = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(caps) = WEEK_DIR.captures(&name) {
            debug!("Found week folder {:?}", path);
            weeks.push(extract_week_info(&path, &caps[1], options));
        }
    }

    weeks.sort_by(|a, b| a.number.cmp(&b.number).then(a.dir_name.cmp(&b.dir_name)));
    weeks
}

/// Collect the metadata of one week folder. Unreadable files leave defaults.
pub fn extract_week_info(week_dir: &Path, number: &str, options: &BootstrapOptions) -> WeekInfo {
    let dir_name = week_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut info = WeekInfo::placeholder(number, &dir_name);

    let slides_file = week_dir.join("slides.md");
    if slides_file.is_file() {
        info.has_slides = true;
        if let Some(title) = extract_title_from_slides(&slides_file) {
            info.title = title;
        }
    }

    let summary_file = week_dir.join("summary.md");
    if summary_file.is_file() {
        let summary = extract_summary_info(&summary_file, &options.objectives_heading);
        if let Some(title) = summary.title {
            info.title = title;
        }
        if let Some(description) = summary.description {
            info.description = description;
        }
    }

    info.has_code = utils::dir_has_entries(&week_dir.join("code"));
    info.has_images = utils::dir_has_entries(&week_dir.join("images"));
    info
}

/// The first `# ` heading of a deck, looking only before the first body text
pub fn extract_title_from_slides(slides_file: &Path) -> Option<String> {
    let content = match fs::read_to_string(slides_file) {
        Ok(content) => utils::normalize_newlines(&content),
        Err(e) => {
            warn!("Could not read {:?}: {}", slides_file, e);
            return None;
        }
    };

    for line in content.lines() {
        let line = line.trim();
        if let Some(title) = line.strip_prefix("# ") {
            return Some(title.trim().to_string());
        }
        if !line.is_empty() && !line.starts_with('#') {
            break;
        }
    }
    None
}

/// Title (first h1) and learning objectives of a `summary.md`
pub fn extract_summary_info(summary_file: &Path, objectives_heading: &str) -> SummaryInfo {
    match fs::read_to_string(summary_file) {
        Ok(content) => parse_summary(
            &utils::normalize_newlines(&content),
            objectives_heading,
        ),
        Err(e) => {
            warn!("Could not read {:?}: {}", summary_file, e);
            SummaryInfo::default()
        }
    }
}

pub fn parse_summary(content: &str, objectives_heading: &str) -> SummaryInfo {
    let title = content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let mut lines = content.lines();
    let mut description = None;
    if lines.any(|line| line.trim_end() == objectives_heading) {
        let section: Vec<&str> = lines.take_while(|line| !line.starts_with("##")).collect();
        let text = section.join("\n").trim().to_string();
        if !text.is_empty() {
            description = Some(text);
        }
    }

    SummaryInfo { title, description }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape text placed inside a JavaScript template literal
fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn render_card(week: &WeekInfo) -> String {
    let mut indicators = String::new();
    if week.has_slides {
        indicators.push_str(r#"<span class="status-indicator slides">📄 Slides</span>"#);
    }
    if week.has_code {
        indicators.push_str(r#"<span class="status-indicator code">💻 Code</span>"#);
    }
    if week.has_images {
        indicators.push_str(r#"<span class="status-indicator images">🖼️ Images</span>"#);
    }
    if indicators.is_empty() {
        indicators.push_str(r#"<span class="status-indicator none">📋 Coming soon</span>"#);
    }

    let description = markdown_to_html(&week.description, &ComrakOptions::default());

    format!(
        r#"
            <div class="lecture-card">
                <div class="week-number">Week {number}</div>
                <h3>{title}</h3>
                <div class="description">
                    {description}
                </div>
                <div class="status-indicators">
                    {indicators}
                </div>
                <div class="actions">
                    <a href="?week={number}" class="view-link">Open lecture</a>
                    <button onclick="generatePDF('{number}')" class="pdf-button">Export PDF</button>
                </div>
            </div>"#,
        number = week.number,
        title = escape_html(&week.title),
        description = description.trim_end(),
        indicators = indicators,
    )
}

/// Render the full index page for the given weeks
pub fn render_index(weeks: &[WeekInfo], options: &BootstrapOptions) -> String {
    let cards: Vec<String> = weeks.iter().map(render_card).collect();

    let week_list: Vec<String> = weeks
        .iter()
        .map(|w| format!("- Week {}: {}", w.number, w.title))
        .collect();
    let week_links: Vec<String> = weeks
        .iter()
        .map(|w| format!("- [Week {n}: {}](?week={n})", w.title, n = w.number))
        .collect();

    let code_count = weeks.iter().filter(|w| w.has_code).count();
    let slides_count = weeks.iter().filter(|w| w.has_slides).count();
    let reveal_base = format!(
        "https://cdn.jsdelivr.net/npm/reveal.js@{}",
        options.reveal_version
    );

    INDEX_TEMPLATE
        .replace("{{SITE_TITLE_JS}}", &escape_template_literal(&options.site_title))
        .replace("{{SITE_TITLE}}", &escape_html(&options.site_title))
        .replace("{{REVEAL_BASE}}", &reveal_base)
        .replace("{{WEEK_COUNT}}", &weeks.len().to_string())
        .replace("{{CODE_COUNT}}", &code_count.to_string())
        .replace("{{SLIDES_COUNT}}", &slides_count.to_string())
        .replace("{{YEAR}}", &chrono::Local::now().format("%Y").to_string())
        .replace("{{WEEK_LIST}}", &escape_template_literal(&week_list.join("\n")))
        .replace("{{WEEK_LINKS}}", &escape_template_literal(&week_links.join("\n")))
        .replace("{{CARDS}}", &cards.join("\n"))
}

/// Scan `slides_dir` and write the index page to `output`.
///
/// Nothing is written when no week folder is found.
pub fn generate_index(
    slides_dir: &Path,
    output: &Path,
    options: &BootstrapOptions,
) -> Result<Vec<WeekInfo>> {
    info!("Scanning weeks in {:?}", slides_dir);
    let weeks = scan_weeks(slides_dir, options);

    if weeks.is_empty() {
        warn!("No weeks found in {:?}", slides_dir);
        return Ok(weeks);
    }

    let html = render_index(&weeks, options);
    utils::write_atomic(output, &html)?;
    info!("Wrote index with {} lecture cards to {:?}", weeks.len(), output);

    Ok(weeks)
}
