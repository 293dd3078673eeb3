//! Student table construction and tier classification

use serde::Serialize;

use super::{quantile, LOWER_QUANTILE, UPPER_QUANTILE};
use crate::ingest::{to_number, RawTable, HEADER_ROW, ROSTER_COL, STUDENT_START_ROW};
use crate::{Error, Result};

/// Performance tier by total-score percentile rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Upper,
    Middle,
    Lower,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Upper, Tier::Middle, Tier::Lower];

    /// Ordering rank: higher score tiers rank higher.
    pub fn rank(self) -> u8 {
        match self {
            Self::Upper => 2,
            Self::Middle => 1,
            Self::Lower => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Middle => "middle",
            Self::Lower => "lower",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The two percentile thresholds classification runs against.
///
/// Distinct from the empirical per-tier minimum scores the distribution
/// chart draws; both are reported side by side.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TierCutoffs {
    pub upper: f64,
    pub lower: f64,
}

impl TierCutoffs {
    /// Compute cutoffs from the valid total scores. `None` when no score
    /// parsed, in which case every student stays untiered.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        let upper = quantile(scores, UPPER_QUANTILE)?;
        let lower = quantile(scores, LOWER_QUANTILE)?;
        Some(Self { upper, lower })
    }

    /// Classification rule. Check order matters: when the cutoffs collapse
    /// to one value, `>= upper` wins and everyone lands in the upper tier.
    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.upper {
            Tier::Upper
        } else if score > self.lower {
            Tier::Middle
        } else {
            Tier::Lower
        }
    }
}

/// One respondent row.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    /// Stable join key: index of this student within the student row range.
    /// The response matrix is keyed by the same ids.
    pub row_id: usize,
    /// Class/roster identifier, opaque.
    pub roster: String,
    /// Total score; coercion failures become `None`.
    pub score: Option<f64>,
    /// `None` when the score was missing or no cutoffs could be computed.
    pub tier: Option<Tier>,
}

/// All retained students plus the thresholds that classified them.
#[derive(Debug, Clone)]
pub struct StudentTable {
    records: Vec<StudentRecord>,
    cutoffs: Option<TierCutoffs>,
    /// Student rows seen before the roster filter, for diagnostics.
    rows_seen: usize,
}

impl StudentTable {
    /// Build from the merged table.
    ///
    /// The total-score column is located by exact label match in the header
    /// row; no match is a fatal lookup error. Cutoffs are computed over
    /// every parseable score in the student row range, including rows later
    /// dropped for a missing roster id.
    pub fn build(table: &RawTable, score_label: &str) -> Result<Self> {
        let score_col = (0..table.n_cols())
            .find(|&col| table.cell(HEADER_ROW, col) == score_label)
            .ok_or_else(|| Error::MissingScoreColumn {
                label: score_label.to_string(),
            })?;

        let rows_seen = table.n_student_rows();
        let scores: Vec<Option<f64>> = (0..rows_seen)
            .map(|i| to_number(table.cell(STUDENT_START_ROW + i, score_col)))
            .collect();
        let valid: Vec<f64> = scores.iter().filter_map(|s| *s).collect();
        let cutoffs = TierCutoffs::from_scores(&valid);

        let mut records = Vec::new();
        for (row_id, score) in scores.into_iter().enumerate() {
            let roster = table.cell(STUDENT_START_ROW + row_id, ROSTER_COL);
            if roster.is_empty() {
                continue;
            }
            let tier = match (score, cutoffs) {
                (Some(s), Some(c)) => Some(c.classify(s)),
                _ => None,
            };
            records.push(StudentRecord {
                row_id,
                roster: roster.to_string(),
                score,
                tier,
            });
        }

        Ok(Self {
            records,
            cutoffs,
            rows_seen,
        })
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn cutoffs(&self) -> Option<TierCutoffs> {
        self.cutoffs
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Student rows in the merged table before the roster filter.
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Students classified into the given tier.
    pub fn in_tier(&self, tier: Tier) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter().filter(move |r| r.tier == Some(tier))
    }

    /// Lowest observed score within a tier, the empirical boundary the
    /// distribution chart draws. `None` for an empty tier.
    pub fn tier_min_score(&self, tier: Tier) -> Option<f64> {
        self.in_tier(tier)
            .filter_map(|r| r.score)
            .fold(None, |min, s| {
                Some(match min {
                    Some(m) if m <= s => m,
                    _ => s,
                })
            })
    }
}
