//! Analyze command implementation

use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::chart::{render_question_chart, render_score_distribution};
use crate::cli::args::AnalyzeArgs;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::ingest::{self, FileRole};

/// Run the full pipeline and write one chart per artifact.
pub fn run_analyze(args: AnalyzeArgs, level: LogLevel) -> Result<(), String> {
    let files = assign_roles(&args.input.files);
    for (path, role) in &files {
        log(
            level,
            LogLevel::Normal,
            &format!("Reading {} ({role})", path.display()),
        );
    }

    let table = ingest::merge_files(&files).map_err(|e| e.to_string())?;
    let analysis = Analysis::from_table(
        &table,
        &args.input.score_label,
        args.input.placeholder.into(),
    )
    .map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "{} students, {} questions in key",
            analysis.students.len(),
            analysis.key.len()
        ),
    );
    if analysis.key.skipped_entries() > 0 {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Skipped {} malformed answer-key entries",
                analysis.key.skipped_entries()
            ),
        );
    }
    if !analysis.skipped_questions.is_empty() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Skipped {} key questions with no response column",
                analysis.skipped_questions.len()
            ),
        );
    }

    std::fs::create_dir_all(&args.output_dir)
        .map_err(|e| format!("Failed to create output directory: {e}"))?;

    let score_chart = args.output_dir.join("score_distribution.svg");
    write_chart(&score_chart, &render_score_distribution(&analysis.students))
        .map_err(|e| format!("Failed to write {}: {e}", score_chart.display()))?;
    log(
        level,
        LogLevel::Normal,
        &format!("Wrote {}", score_chart.display()),
    );

    for stats in &analysis.stats {
        let path = args
            .output_dir
            .join(format!("question_{:02}.svg", stats.question));
        write_chart(&path, &render_question_chart(stats))
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        log(level, LogLevel::Normal, &format!("Wrote {}", path.display()));
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  question {}: correct {:.2}, discrimination {:.2}, n={}",
                stats.question, stats.correct_rate, stats.discrimination, stats.overall.respondents
            ),
        );
    }

    Ok(())
}

/// The first file is the primary (header + key), the rest supplement it.
pub(super) fn assign_roles(files: &[PathBuf]) -> Vec<(&Path, FileRole)> {
    files
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let role = if idx == 0 {
                FileRole::Primary
            } else {
                FileRole::Supplementary
            };
            (path.as_path(), role)
        })
        .collect()
}

fn write_chart(path: &Path, markup: &str) -> crate::Result<()> {
    std::fs::write(path, markup)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_file_is_primary() {
        let files = vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")];
        let roles = assign_roles(&files);
        assert_eq!(roles[0].1, FileRole::Primary);
        assert_eq!(roles[1].1, FileRole::Supplementary);
    }
}
