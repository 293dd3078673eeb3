//! Chart rendering
//!
//! Charts are built as SVG markup strings; the analyze command writes them
//! to disk. The `inspect` command can render per-question selection bars in
//! the terminal instead.

mod question;
mod score_dist;
mod svg;
mod terminal;

pub use question::render_question_chart;
pub use score_dist::render_score_distribution;
pub use svg::{Anchor, SvgCanvas};
pub use terminal::render_question_block;

use crate::analysis::Tier;

/// Tier point/bar colors, as in the source charts: upper red, middle blue,
/// lower green.
pub fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Upper => "#d62728",
        Tier::Middle => "#1f77b4",
        Tier::Lower => "#2ca02c",
    }
}

/// Color for students that could not be tiered (missing score).
pub const UNTIERED_COLOR: &str = "#9e9e9e";

/// Per-choice line colors for the selection-ratio panel.
pub fn choice_color(choice: u8) -> &'static str {
    match choice {
        1 => "#1f77b4",
        2 => "#2ca02c",
        3 => "#9467bd",
        4 => "#ff7f0e",
        5 => "#8c564b",
        _ => "#7f7f7f",
    }
}

/// Highlight color for the correct choice.
pub const HIGHLIGHT_COLOR: &str = "#f1c40f";

/// Neutral bar color for the overall panel.
pub const OVERALL_COLOR: &str = "#7f7f7f";

pub(crate) const FRAME_COLOR: &str = "#444444";
pub(crate) const GRID_COLOR: &str = "#dddddd";
pub(crate) const TEXT_COLOR: &str = "#222222";
