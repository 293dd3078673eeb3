//! Terminal rendering of per-question selection bars

use crate::analysis::{QuestionStats, CHOICES};

/// Render one question as a framed block of proportional bars, one row per
/// choice of the overall selection ratio, with the correct choice marked.
pub fn render_question_block(stats: &QuestionStats, bar_width: usize) -> String {
    let inner = bar_width + 24;
    let title = format!(" Question {} ", stats.question);

    let mut output = String::new();
    output.push_str("┌─");
    output.push_str(&title);
    output.push_str(&"─".repeat(inner.saturating_sub(title.len() + 1)));
    output.push_str("┐\n");

    for (idx, choice) in CHOICES.into_iter().enumerate() {
        let ratio = stats.overall.ratios[idx];
        let bar_len = (ratio / 100.0 * bar_width as f64).round() as usize;
        let marker = if choice == stats.answer { '▸' } else { ' ' };
        let line = format!(
            "{marker}{choice} {:<bar_width$} {ratio:5.1}%",
            "█".repeat(bar_len),
        );
        output.push_str(&format!("│{line:<inner$}│\n"));
    }

    let footer = format!(
        " correct {:.2}  discrimination {:.2}",
        stats.correct_rate, stats.discrimination
    );
    output.push_str(&format!("│{footer:<inner$}│\n"));
    output.push_str("└");
    output.push_str(&"─".repeat(inner));
    output.push_str("┘\n");
    output
}
