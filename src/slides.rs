// ABOUTME: Slide partitioning for the slidesmith application
// ABOUTME: Splits decks on the separator line, rejoins them and measures slide size

/// A line consisting solely of `---`, including the newlines around it
pub const SLIDE_SEPARATOR: &str = "\n---\n";

/// Size of one slide body against the configured maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub line_count: usize,
    pub oversize: bool,
}

/// Split a document into slide bodies, in order.
///
/// Separator lines are not part of any body. `reassemble` with the same
/// separator gives back the input byte for byte.
pub fn partition<'a>(document: &'a str, separator: &str) -> Vec<&'a str> {
    document.split(separator).collect()
}

/// Join slide bodies back into a document
pub fn reassemble<S: AsRef<str>>(slides: &[S], separator: &str) -> String {
    let mut out = String::new();
    for (i, slide) in slides.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(slide.as_ref());
    }
    out
}

/// Number of lines in a slide body, blank lines included
pub fn count_lines(slide: &str) -> usize {
    slide.split('\n').count()
}

/// Measure a slide body against `max_lines`
pub fn measure(slide: &str, max_lines: usize) -> SlideSize {
    let line_count = count_lines(slide);
    SlideSize {
        line_count,
        oversize: line_count > max_lines,
    }
}
