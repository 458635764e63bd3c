// ABOUTME: Block context tracking for the slidesmith application
// ABOUTME: Follows code fences and multi-column container divs while scanning lines

/// Markers that open a multi-column container
pub const DEFAULT_CONTAINER_MARKERS: &[&str] = &["<div class=\"column", "<div class=\"grid"];

pub fn default_container_markers() -> Vec<String> {
    DEFAULT_CONTAINER_MARKERS.iter().map(|m| m.to_string()).collect()
}

const FENCE: &str = "```";

/// Whether a line opens or closes a fenced code block
pub fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

/// Scan state for one slide or document.
///
/// The fence flag toggles on every fence line. A container opens on a line
/// outside a fence carrying one of the markers; from then on every `<div`
/// adds one to the depth and every `</div>` removes one, and the container
/// is closed once the depth is back to zero. Containers are not tracked
/// independently: a marker seen inside an open container only adds to the
/// same depth.
#[derive(Debug, Clone)]
pub struct BlockContext<'m> {
    markers: &'m [String],
    in_fence: bool,
    container_depth: usize,
}

impl<'m> BlockContext<'m> {
    pub fn new(markers: &'m [String]) -> Self {
        Self {
            markers,
            in_fence: false,
            container_depth: 0,
        }
    }

    pub fn in_fence(&self) -> bool {
        self.in_fence
    }

    pub fn in_container(&self) -> bool {
        self.container_depth > 0
    }

    /// Neither inside a fence nor inside a container
    pub fn is_clear(&self) -> bool {
        !self.in_fence && self.container_depth == 0
    }

    /// Update the state with the next line
    pub fn observe(&mut self, line: &str) {
        if is_fence(line) {
            self.in_fence = !self.in_fence;
            return;
        }
        if self.in_fence {
            return;
        }

        let opens = line.matches("<div").count();
        let closes = line.matches("</div>").count();

        if self.container_depth == 0 {
            if self.markers.iter().any(|m| line.contains(m.as_str())) {
                self.container_depth = opens.saturating_sub(closes);
            }
        } else {
            self.container_depth = (self.container_depth + opens).saturating_sub(closes);
        }
    }
}
