// ABOUTME: Library module for the slidesmith program.
// ABOUTME: Contains the Markdown deck rewriters and the course index generator.

// Reexport modules
pub mod blocks;
pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod restore;
pub mod slides;
pub mod split;
pub mod times;
pub mod utils;
pub mod wrap;

// Reexport common types and functions
pub use blocks::BlockContext;
pub use bootstrap::{generate_index, render_index, scan_weeks, BootstrapOptions, WeekInfo};
pub use config::Config;
pub use errors::{DeckError, Result};
pub use restore::{extract_blocks, restore_blocks, Restored};
pub use slides::{measure, partition, reassemble, SlideSize, SLIDE_SEPARATOR};
pub use split::{split_document, split_slide, SlideOutcome, SlideReport, SplitOptions, SplitResult};
pub use times::strip_time_annotations;
pub use wrap::{wrap_document, wrap_line, WrapOptions};
