//! Inspect command implementation
//!
//! Runs the pipeline without writing charts and reports what the filtering
//! policies did: per-file row accounting, dropped answer-key entries,
//! skipped questions, both cutoff flavors, and per-question stats.

use serde::Serialize;

use crate::analysis::{Analysis, KeyEntry, QuestionStats, Tier, TierCutoffs};
use crate::chart::render_question_block;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::ingest::{self, SheetSummary};

use super::analyze::assign_roles;

const BAR_WIDTH: usize = 30;

/// Empirical lowest score per tier, kept separate from the percentile
/// cutoffs on purpose: the chart draws these, the classifier used those.
#[derive(Debug, Clone, Serialize)]
pub struct TierMinima {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

/// Tier population sizes.
#[derive(Debug, Clone, Serialize)]
pub struct TierSizes {
    pub upper: usize,
    pub middle: usize,
    pub lower: usize,
    pub untiered: usize,
}

/// Everything `inspect` reports.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub files: Vec<SheetSummary>,
    pub merged_rows: usize,
    pub student_rows_seen: usize,
    pub students_retained: usize,
    pub students_scored: usize,
    pub key_entries: Vec<KeyEntry>,
    pub key_skipped_entries: usize,
    pub cutoffs: Option<TierCutoffs>,
    pub tier_minima: TierMinima,
    pub tier_sizes: TierSizes,
    pub questions: Vec<QuestionStats>,
    pub questions_without_responses: Vec<u32>,
}

/// Run the pipeline and report diagnostics in the requested format.
pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    let files = assign_roles(&args.input.files);
    let table = ingest::merge_files(&files).map_err(|e| e.to_string())?;
    let analysis = Analysis::from_table(
        &table,
        &args.input.score_label,
        args.input.placeholder.into(),
    )
    .map_err(|e| e.to_string())?;

    let mut report = build_report(&table, &analysis);
    if let Some(question) = args.question {
        report.questions.retain(|q| q.question == question);
        if report.questions.is_empty() {
            return Err(format!("question {question} not found in the analysis"));
        }
    }

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize report: {e}"))?;
            log(level, LogLevel::Normal, &json);
        }
        OutputFormat::Text => print_text_report(&report, level),
        OutputFormat::Bars => {
            print_text_report(&report, level);
            for stats in &report.questions {
                log(
                    level,
                    LogLevel::Normal,
                    &render_question_block(stats, BAR_WIDTH),
                );
            }
        }
    }

    Ok(())
}

/// Assemble the diagnostics from the run's tables.
pub(crate) fn build_report(table: &ingest::RawTable, analysis: &Analysis) -> AnalysisReport {
    let students = &analysis.students;
    let tier_sizes = TierSizes {
        upper: students.in_tier(Tier::Upper).count(),
        middle: students.in_tier(Tier::Middle).count(),
        lower: students.in_tier(Tier::Lower).count(),
        untiered: students
            .records()
            .iter()
            .filter(|r| r.tier.is_none())
            .count(),
    };

    AnalysisReport {
        files: table.summaries().to_vec(),
        merged_rows: table.n_rows(),
        student_rows_seen: students.rows_seen(),
        students_retained: students.len(),
        students_scored: students
            .records()
            .iter()
            .filter(|r| r.score.is_some())
            .count(),
        key_entries: analysis.key.entries().to_vec(),
        key_skipped_entries: analysis.key.skipped_entries(),
        cutoffs: students.cutoffs(),
        tier_minima: TierMinima {
            upper: students.tier_min_score(Tier::Upper),
            middle: students.tier_min_score(Tier::Middle),
            lower: students.tier_min_score(Tier::Lower),
        },
        tier_sizes,
        questions: analysis.stats.clone(),
        questions_without_responses: analysis.skipped_questions.clone(),
    }
}

fn print_text_report(report: &AnalysisReport, level: LogLevel) {
    log(level, LogLevel::Normal, "Files:");
    for file in &report.files {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  {} ({}): kept {} of {} rows",
                file.path, file.role, file.rows_kept, file.rows_read
            ),
        );
    }

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Students: {} retained of {} rows, {} scored",
            report.students_retained, report.student_rows_seen, report.students_scored
        ),
    );

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Answer key: {} questions ({} malformed entries skipped)",
            report.key_entries.len(),
            report.key_skipped_entries
        ),
    );

    match report.cutoffs {
        Some(cutoffs) => log(
            level,
            LogLevel::Normal,
            &format!(
                "Cutoffs: upper >= {:.2}, lower <= {:.2} (percentiles)",
                cutoffs.upper, cutoffs.lower
            ),
        ),
        None => log(level, LogLevel::Normal, "Cutoffs: none (no valid scores)"),
    }
    let minima = &report.tier_minima;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Observed boundaries: upper min {}, middle min {}",
            fmt_opt(minima.upper),
            fmt_opt(minima.middle)
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Tiers: {} upper / {} middle / {} lower / {} untiered",
            report.tier_sizes.upper,
            report.tier_sizes.middle,
            report.tier_sizes.lower,
            report.tier_sizes.untiered
        ),
    );

    if !report.questions_without_responses.is_empty() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Key questions with no response column: {:?}",
                report.questions_without_responses
            ),
        );
    }

    log(level, LogLevel::Normal, "Questions:");
    for stats in &report.questions {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  {:>3}: answer {}, correct {:.2}, discrimination {:+.2}, n={}",
                stats.question,
                stats.answer,
                stats.correct_rate,
                stats.discrimination,
                stats.overall.respondents
            ),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "       upper {:.2} / middle {:.2} / lower {:.2}",
                stats.upper_correct_rate, stats.middle_correct_rate, stats.lower_correct_rate
            ),
        );
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PlaceholderPolicy;
    use crate::ingest::{merge_sheets, FileRole, RawTable, Sheet, DEFAULT_SCORE_LABEL};

    fn fixture() -> (RawTable, Analysis) {
        // column 4 has a key cell but a blank header, so it is neither a key
        // entry nor a question column
        let rows: Vec<Vec<String>> = [
            vec!["", "", "성명", "1", "", "과목총점"],
            vec!["", "", "정답", "3", "9", ""],
            vec!["", "", "-", "", "", ""],
            vec!["", "1-01", "김", "3", "", "90"],
            vec!["", "1-02", "이", "1", "", "50"],
            vec!["", "1-03", "박", ".", "", "10"],
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
        let analysis =
            Analysis::from_table(&table, DEFAULT_SCORE_LABEL, PlaceholderPolicy::Credit).unwrap();
        (table, analysis)
    }

    #[test]
    fn report_counts_filters_and_tiers() {
        let (table, analysis) = fixture();
        let report = build_report(&table, &analysis);

        assert_eq!(report.students_retained, 3);
        assert_eq!(report.students_scored, 3);
        assert_eq!(report.tier_sizes.upper, 1);
        assert_eq!(report.tier_sizes.middle, 1);
        assert_eq!(report.tier_sizes.lower, 1);
        // question 1 analyzable, question 9 keyed but without responses
        assert_eq!(report.key_entries.len(), 1);
        assert_eq!(report.questions.len(), 1);
    }

    #[test]
    fn report_serializes_to_json() {
        let (table, analysis) = fixture();
        let report = build_report(&table, &analysis);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"discrimination\""));
        assert!(json.contains("\"cutoffs\""));
    }
}
