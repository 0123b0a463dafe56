use serde::Serialize;

use crate::pkg::internal::adaptors::{
    comparisons::spec::{ComparisonEntry, CreditEvaluation},
    curriculum::spec::CurriculumEntry,
};
use crate::pkg::internal::tor::{service::require_account, similarity, store::ComparisonStore};
use crate::prelude::{Error, Result};

const STRONG_MATCH: f64 = 80.0;
const REVIEW_MATCH: f64 = 50.0;

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub subject_code: String,
    pub subject_description: String,
    pub total_academic_units: f64,
    pub final_grade: f64,
    pub remarks: String,
    pub summary: String,
    pub credit_evaluation: CreditEvaluation,
    pub match_accuracy: u32,
    pub matched_subject: Option<String>,
}

/// Curriculum subject whose joined descriptions are most similar to
/// `description`, with the score. `None` when nothing shares a character.
pub fn best_match<'a>(description: &str, curriculum: &'a [CurriculumEntry]) -> Option<(&'a CurriculumEntry, f64)> {
    let mut best: Option<(&CurriculumEntry, f64)> = None;
    for subject in curriculum {
        let score = similarity::ratio(description, &subject.description.join(" "));
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((subject, score));
        }
    }
    best
}

/// Suggested evaluation for a row whose best match scored `accuracy`.
pub fn suggest_evaluation(accuracy: f64, passing: bool, threshold: f64) -> CreditEvaluation {
    if accuracy < threshold {
        CreditEvaluation::Investigate
    } else if accuracy >= STRONG_MATCH && passing {
        CreditEvaluation::Accepted
    } else if accuracy >= REVIEW_MATCH {
        CreditEvaluation::Void
    } else {
        CreditEvaluation::Denied
    }
}

fn summarize(entry: &ComparisonEntry, best: Option<(&CurriculumEntry, f64)>, threshold: f64) -> String {
    match best {
        Some((subject, accuracy)) if accuracy >= threshold => format!(
            "✓ Match found\nCurriculum subject: {}\nSimilarity: {}%\nUnits: student={}, curriculum={}",
            subject.subject_code, accuracy as u32, entry.total_academic_units as i32, subject.units
        ),
        _ => format!(
            "✗ No match found\nDescription similarity below {threshold}% threshold\nBest match: {} ({}%)",
            best.map_or("none", |(s, _)| s.subject_code.as_str()),
            best.map_or(0, |(_, a)| a as u32)
        ),
    }
}

/// Matches every comparison row of the account against the active curriculum
/// and records a summary plus a suggested credit evaluation.
#[tracing::instrument(skip(store))]
pub async fn sync_curriculum_matching<S>(store: &mut S, account_id: &str, threshold: f64) -> Result<Vec<MatchResult>>
where
    S: ComparisonStore + ?Sized,
{
    require_account(account_id)?;
    store.lock_account(account_id).await?;
    let entries = store.comparisons(account_id).await?;
    if entries.is_empty() {
        return Err(Error::not_found("TOR entries", account_id));
    }
    let curriculum = store.active_curriculum().await?;

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let best = best_match(&entry.subject_description, &curriculum);
        let accuracy = best.map_or(0.0, |(_, a)| a);
        let evaluation = suggest_evaluation(accuracy, entry.is_passing_grade(), threshold);
        let summary = summarize(&entry, best, threshold);
        store.save_matching(entry.id, &summary, evaluation).await?;

        results.push(MatchResult {
            subject_code: entry.subject_code,
            subject_description: entry.subject_description,
            total_academic_units: entry.total_academic_units,
            final_grade: entry.final_grade,
            remarks: entry.remarks,
            summary,
            credit_evaluation: evaluation,
            match_accuracy: accuracy as u32,
            matched_subject: best.map(|(s, _)| s.subject_code.clone()),
        });
    }

    tracing::info!(account_id, matched = results.len(), "synced curriculum matching");
    Ok(results)
}
