//! Score-distribution scatter chart

use crate::analysis::{StudentTable, Tier};

use super::svg::{Anchor, SvgCanvas};
use super::{tier_color, FRAME_COLOR, GRID_COLOR, TEXT_COLOR, UNTIERED_COLOR};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 540.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 90.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 60.0;

/// Render the sorted total-score scatter.
///
/// Students with a parsed score are placed left to right in ascending score
/// order and colored by tier. The dashed reference lines sit at the lowest
/// observed middle-tier and upper-tier scores: the empirical boundaries,
/// which need not equal the percentile cutoffs that did the classifying. A
/// tier with no students contributes no line.
pub fn render_score_distribution(students: &StudentTable) -> String {
    let mut scored: Vec<(f64, Option<Tier>)> = students
        .records()
        .iter()
        .filter_map(|r| r.score.map(|s| (s, r.tier)))
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut canvas = SvgCanvas::new(WIDTH, HEIGHT);
    canvas.bold_text(
        WIDTH / 2.0,
        30.0,
        "Score distribution",
        20.0,
        TEXT_COLOR,
        Anchor::Middle,
    );

    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = HEIGHT - TOP - BOTTOM;
    canvas.frame(LEFT, TOP, plot_w, plot_h, FRAME_COLOR);

    if scored.is_empty() {
        canvas.text(
            WIDTH / 2.0,
            HEIGHT / 2.0,
            "no scored students",
            14.0,
            TEXT_COLOR,
            Anchor::Middle,
        );
        return canvas.finish();
    }

    let min = scored.first().map(|(s, _)| *s).unwrap_or(0.0);
    let max = scored.last().map(|(s, _)| *s).unwrap_or(0.0);
    let pad = ((max - min) * 0.05).max(1.0);
    let (y_min, y_max) = (min - pad, max + pad);

    let y_of = |score: f64| TOP + (y_max - score) / (y_max - y_min) * plot_h;
    let x_of = |idx: usize| {
        if scored.len() == 1 {
            LEFT + plot_w / 2.0
        } else {
            LEFT + idx as f64 / (scored.len() - 1) as f64 * plot_w
        }
    };

    // horizontal grid with score labels
    const TICKS: usize = 5;
    for t in 0..=TICKS {
        let score = y_min + (y_max - y_min) * t as f64 / TICKS as f64;
        let y = y_of(score);
        canvas.line(LEFT, y, LEFT + plot_w, y, GRID_COLOR, 1.0);
        canvas.text(
            LEFT - 8.0,
            y + 4.0,
            &format!("{score:.1}"),
            12.0,
            TEXT_COLOR,
            Anchor::End,
        );
    }

    // empirical tier boundaries
    for (tier, label) in [(Tier::Middle, "middle min"), (Tier::Upper, "upper min")] {
        if let Some(boundary) = students.tier_min_score(tier) {
            let y = y_of(boundary);
            let color = tier_color(tier);
            canvas.dashed_line(LEFT, y, LEFT + plot_w, y, color, 1.5);
            canvas.text(
                LEFT + plot_w + 6.0,
                y + 4.0,
                &format!("{label} {boundary:.1}"),
                12.0,
                color,
                Anchor::Start,
            );
        }
    }

    for (idx, (score, tier)) in scored.iter().enumerate() {
        let color = tier.map_or(UNTIERED_COLOR, tier_color);
        canvas.circle(x_of(idx), y_of(*score), 4.0, color);
    }

    // legend for the tiers actually present
    let mut legend_x = LEFT + 12.0;
    for tier in Tier::ALL {
        if students.in_tier(tier).next().is_none() {
            continue;
        }
        canvas.circle(legend_x, TOP + 14.0, 5.0, tier_color(tier));
        canvas.text(
            legend_x + 10.0,
            TOP + 18.0,
            tier.label(),
            12.0,
            TEXT_COLOR,
            Anchor::Start,
        );
        legend_x += 80.0;
    }

    canvas.text(
        LEFT + plot_w / 2.0,
        HEIGHT - 20.0,
        "students, ascending by total score",
        13.0,
        TEXT_COLOR,
        Anchor::Middle,
    );

    canvas.finish()
}
