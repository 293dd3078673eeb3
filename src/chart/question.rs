//! Per-question composite chart
//!
//! Mirrors the review layout teachers get per question: the left half is a
//! line panel of selection ratio per choice across the three tiers, the
//! right half holds four bar panels (overall and one per tier). The correct
//! choice is drawn gold and heavier everywhere.

use crate::analysis::{ChoiceDistribution, QuestionStats, Tier, CHOICES};

use super::svg::{Anchor, SvgCanvas};
use super::{
    choice_color, tier_color, FRAME_COLOR, GRID_COLOR, HIGHLIGHT_COLOR, OVERALL_COLOR, TEXT_COLOR,
};

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 560.0;

const LINE_PANEL: Panel = Panel {
    x: 70.0,
    y: 90.0,
    w: 470.0,
    h: 400.0,
};

const BAR_W: f64 = 250.0;
const BAR_H: f64 = 180.0;

struct Panel {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Panel {
    fn y_of(&self, ratio: f64) -> f64 {
        self.y + self.h - ratio / 100.0 * self.h
    }
}

/// Render one question's composite chart.
pub fn render_question_chart(stats: &QuestionStats) -> String {
    let mut canvas = SvgCanvas::new(WIDTH, HEIGHT);

    canvas.bold_text(
        40.0,
        40.0,
        &format!(
            "Question {} - correct rate {:.2}, discrimination {:.2}",
            stats.question, stats.correct_rate, stats.discrimination
        ),
        20.0,
        TEXT_COLOR,
        Anchor::Start,
    );

    draw_line_panel(&mut canvas, stats);

    let panels = [
        ("Overall", &stats.overall, OVERALL_COLOR),
        ("Upper", &stats.upper, tier_color(Tier::Upper)),
        ("Middle", &stats.middle, tier_color(Tier::Middle)),
        ("Lower", &stats.lower, tier_color(Tier::Lower)),
    ];
    let origins = [
        (620.0, 90.0),
        (920.0, 90.0),
        (620.0, 340.0),
        (920.0, 340.0),
    ];
    for ((caption, dist, base), (x, y)) in panels.into_iter().zip(origins) {
        draw_bar_panel(
            &mut canvas,
            &Panel {
                x,
                y,
                w: BAR_W,
                h: BAR_H,
            },
            caption,
            dist,
            base,
            stats.answer,
        );
    }

    canvas.finish()
}

fn draw_line_panel(canvas: &mut SvgCanvas, stats: &QuestionStats) {
    let panel = &LINE_PANEL;
    canvas.frame(panel.x, panel.y, panel.w, panel.h, FRAME_COLOR);

    for pct in [0.0, 25.0, 50.0, 75.0, 100.0] {
        let y = panel.y_of(pct);
        canvas.line(panel.x, y, panel.x + panel.w, y, GRID_COLOR, 1.0);
        canvas.text(
            panel.x - 8.0,
            y + 4.0,
            &format!("{pct:.0}%"),
            12.0,
            TEXT_COLOR,
            Anchor::End,
        );
    }

    let tiers = Tier::ALL;
    let x_of = |idx: usize| panel.x + (idx as f64 + 0.5) / tiers.len() as f64 * panel.w;
    for (idx, tier) in tiers.iter().enumerate() {
        canvas.text(
            x_of(idx),
            panel.y + panel.h + 18.0,
            tier.label(),
            13.0,
            TEXT_COLOR,
            Anchor::Middle,
        );
    }

    // correct choice last so the gold line sits on top; an answer outside
    // the choice set has no line of its own
    let mut order: Vec<u8> = CHOICES.into_iter().filter(|&c| c != stats.answer).collect();
    if CHOICES.contains(&stats.answer) {
        order.push(stats.answer);
    }

    for choice in order {
        let is_answer = choice == stats.answer;
        let color = if is_answer {
            HIGHLIGHT_COLOR
        } else {
            choice_color(choice)
        };
        let width = if is_answer { 4.0 } else { 2.0 };
        let points: Vec<(f64, f64)> = tiers
            .iter()
            .enumerate()
            .map(|(idx, &tier)| {
                let ratio = stats.distribution(tier).ratios[usize::from(choice) - 1];
                (x_of(idx), panel.y_of(ratio))
            })
            .collect();
        canvas.polyline(&points, color, width);
        for &(x, y) in &points {
            canvas.circle(x, y, if is_answer { 5.0 } else { 4.0 }, color);
        }
    }

    // legend to the right edge of the panel
    let legend_x = panel.x + panel.w - 104.0;
    let mut legend_y = panel.y + 16.0;
    for choice in CHOICES {
        let is_answer = choice == stats.answer;
        let color = if is_answer {
            HIGHLIGHT_COLOR
        } else {
            choice_color(choice)
        };
        canvas.line(legend_x, legend_y - 4.0, legend_x + 22.0, legend_y - 4.0, color, 3.0);
        let label = if is_answer {
            format!("choice {choice} (answer)")
        } else {
            format!("choice {choice}")
        };
        canvas.text(legend_x + 28.0, legend_y, &label, 12.0, TEXT_COLOR, Anchor::Start);
        legend_y += 18.0;
    }

    canvas.text(
        panel.x + panel.w / 2.0,
        panel.y - 12.0,
        "selection ratio by tier",
        14.0,
        TEXT_COLOR,
        Anchor::Middle,
    );
}

fn draw_bar_panel(
    canvas: &mut SvgCanvas,
    panel: &Panel,
    caption: &str,
    dist: &ChoiceDistribution,
    base_color: &str,
    answer: u8,
) {
    canvas.frame(panel.x, panel.y, panel.w, panel.h, FRAME_COLOR);
    canvas.text(
        panel.x + panel.w / 2.0,
        panel.y - 8.0,
        &format!("{caption} (n={})", dist.respondents),
        13.0,
        TEXT_COLOR,
        Anchor::Middle,
    );

    for pct in [50.0, 100.0] {
        let y = panel.y_of(pct);
        canvas.line(panel.x, y, panel.x + panel.w, y, GRID_COLOR, 1.0);
    }

    let slot = panel.w / CHOICES.len() as f64;
    let bar_w = slot * 0.6;
    for (idx, choice) in CHOICES.into_iter().enumerate() {
        let ratio = dist.ratios[idx];
        let x = panel.x + idx as f64 * slot + (slot - bar_w) / 2.0;
        let top = panel.y_of(ratio);
        let fill = if choice == answer {
            HIGHLIGHT_COLOR
        } else {
            base_color
        };
        if ratio > 0.0 {
            canvas.rect(x, top, bar_w, panel.y + panel.h - top, fill);
        }
        canvas.text(
            panel.x + (idx as f64 + 0.5) * slot,
            panel.y + panel.h + 14.0,
            &choice.to_string(),
            11.0,
            TEXT_COLOR,
            Anchor::Middle,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{question_stats, KeyEntry, ResponseMatrix, StudentTable};
    use crate::ingest::{merge_sheets, FileRole, Sheet, DEFAULT_SCORE_LABEL};

    fn fixture_stats() -> QuestionStats {
        let rows: Vec<Vec<String>> = [
            vec!["", "", "성명", "1", "과목총점"],
            vec!["", "", "정답", "3", ""],
            vec!["", "", "-", "", ""],
            vec!["", "1-01", "김", "3", "90"],
            vec!["", "1-02", "이", "1", "50"],
            vec!["", "1-03", "박", "2", "10"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect();
        let table = merge_sheets(vec![(
            "t.csv".to_string(),
            FileRole::Primary,
            Sheet::from_rows(rows),
        )])
        .unwrap();
        let students = StudentTable::build(&table, DEFAULT_SCORE_LABEL).unwrap();
        let matrix = ResponseMatrix::extract(&table);
        question_stats(
            KeyEntry {
                question: 1,
                answer: 3,
            },
            &students,
            &matrix,
        )
        .unwrap()
    }

    #[test]
    fn title_carries_rates_to_two_decimals() {
        let svg = render_question_chart(&fixture_stats());
        assert!(svg.contains("Question 1"));
        assert!(svg.contains("correct rate 0.33"));
        assert!(svg.contains("discrimination 1.00"));
    }

    #[test]
    fn four_bar_panels_are_captioned() {
        let svg = render_question_chart(&fixture_stats());
        for caption in ["Overall (n=3)", "Upper (n=1)", "Middle (n=1)", "Lower (n=1)"] {
            assert!(svg.contains(caption), "missing {caption}");
        }
    }

    #[test]
    fn answer_is_highlighted() {
        let svg = render_question_chart(&fixture_stats());
        assert!(svg.contains("choice 3 (answer)"));
        assert!(svg.contains(HIGHLIGHT_COLOR));
    }
}
