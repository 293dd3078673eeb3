//! Per-question selection ratios, correctness, and discrimination

use serde::Serialize;

use super::{AnswerKey, KeyEntry, ResponseMatrix, StudentTable, Tier};

/// The fixed choice set of the answer sheet.
pub const CHOICES: [u8; 5] = [1, 2, 3, 4, 5];

/// Selection counts and ratios over the fixed choice set for one group of
/// students.
///
/// A response is valid when it parses to an integer in the choice set;
/// valid responses are the denominator for both ratios and correctness, so
/// per-choice counts always sum to `respondents` and ratios to 100% (or
/// everything is zero for an empty group).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceDistribution {
    /// Valid responses in the group
    pub respondents: usize,
    /// Selections per choice, indexed by `choice - 1`
    pub counts: [usize; 5],
    /// Selection percentage per choice, 0 when the group is empty
    pub ratios: [f64; 5],
}

impl ChoiceDistribution {
    fn collect<'a>(responses: impl Iterator<Item = Option<&'a str>>) -> Self {
        let mut counts = [0usize; 5];
        let mut respondents = 0;
        for choice in responses.flatten().filter_map(parse_choice) {
            counts[usize::from(choice) - 1] += 1;
            respondents += 1;
        }

        let mut ratios = [0.0; 5];
        if respondents > 0 {
            for (ratio, &count) in ratios.iter_mut().zip(counts.iter()) {
                *ratio = count as f64 / respondents as f64 * 100.0;
            }
        }

        Self {
            respondents,
            counts,
            ratios,
        }
    }

    /// Fraction of the group that picked `answer`, 0 for an empty group.
    pub fn correct_rate(&self, answer: u8) -> f64 {
        if self.respondents == 0 {
            return 0.0;
        }
        match CHOICES.iter().position(|&c| c == answer) {
            Some(idx) => self.counts[idx] as f64 / self.respondents as f64,
            None => 0.0,
        }
    }
}

/// Diagnostics for one question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionStats {
    pub question: u32,
    pub answer: u8,
    pub overall: ChoiceDistribution,
    pub upper: ChoiceDistribution,
    pub middle: ChoiceDistribution,
    pub lower: ChoiceDistribution,
    pub correct_rate: f64,
    pub upper_correct_rate: f64,
    pub middle_correct_rate: f64,
    pub lower_correct_rate: f64,
    /// Upper-tier correctness minus lower-tier correctness, in [-1, 1]
    pub discrimination: f64,
}

impl QuestionStats {
    pub fn distribution(&self, tier: Tier) -> &ChoiceDistribution {
        match tier {
            Tier::Upper => &self.upper,
            Tier::Middle => &self.middle,
            Tier::Lower => &self.lower,
        }
    }

    pub fn tier_correct_rate(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Upper => self.upper_correct_rate,
            Tier::Middle => self.middle_correct_rate,
            Tier::Lower => self.lower_correct_rate,
        }
    }
}

/// Compute one question's stats, `None` when the key question has no
/// response column (the question is skipped, not an error).
pub fn question_stats(
    entry: KeyEntry,
    students: &StudentTable,
    matrix: &ResponseMatrix,
) -> Option<QuestionStats> {
    if !matrix.has_question(entry.question) {
        return None;
    }

    let overall = ChoiceDistribution::collect(
        students
            .records()
            .iter()
            .map(|r| matrix.response(entry.question, r.row_id)),
    );
    let per_tier = |tier: Tier| {
        ChoiceDistribution::collect(
            students
                .in_tier(tier)
                .map(|r| matrix.response(entry.question, r.row_id)),
        )
    };
    let upper = per_tier(Tier::Upper);
    let middle = per_tier(Tier::Middle);
    let lower = per_tier(Tier::Lower);

    let correct_rate = overall.correct_rate(entry.answer);
    let upper_correct_rate = upper.correct_rate(entry.answer);
    let middle_correct_rate = middle.correct_rate(entry.answer);
    let lower_correct_rate = lower.correct_rate(entry.answer);

    Some(QuestionStats {
        question: entry.question,
        answer: entry.answer,
        overall,
        upper,
        middle,
        lower,
        correct_rate,
        upper_correct_rate,
        middle_correct_rate,
        lower_correct_rate,
        discrimination: upper_correct_rate - lower_correct_rate,
    })
}

/// Stats for every key question with a response column, in key order.
pub fn all_question_stats(
    key: &AnswerKey,
    students: &StudentTable,
    matrix: &ResponseMatrix,
) -> Vec<QuestionStats> {
    key.entries()
        .iter()
        .filter_map(|&entry| question_stats(entry, students, matrix))
        .collect()
}

/// A response parsed into the choice set. Accepts integral numeric forms
/// (the merged export mixes "3" and "3.0"); anything else is invalid.
fn parse_choice(response: &str) -> Option<u8> {
    let n = crate::ingest::to_number(response)?;
    if n.fract() != 0.0 {
        return None;
    }
    let choice = n as i64;
    u8::try_from(choice).ok().filter(|c| CHOICES.contains(c))
}
