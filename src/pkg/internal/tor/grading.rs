use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::pkg::internal::adaptors::{
    comparisons::spec::{ComparisonEntry, REMARK_FAILED, REMARK_INVALID_GRADE, REMARK_PASSED},
    curriculum::spec::CurriculumEntry,
};
use crate::pkg::internal::tor::{service::require_account, similarity, store::ComparisonStore};
use crate::prelude::{Error, Result};

const UPPER_BAND: RangeInclusive<f64> = 1.0..=2.9;
const LOWER_BAND: RangeInclusive<f64> = 3.0..=5.0;

/// Which end of the 1.0–5.0 scale counts as passing. Most schools pass
/// 1.0–2.9; some transcripts use the inverted scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingScale {
    #[default]
    Standard,
    Reverse,
}

impl GradingScale {
    pub fn remarks_for(self, grade: f64) -> &'static str {
        let (passing, failing) = match self {
            GradingScale::Standard => (UPPER_BAND, LOWER_BAND),
            GradingScale::Reverse => (LOWER_BAND, UPPER_BAND),
        };
        if passing.contains(&grade) {
            REMARK_PASSED
        } else if failing.contains(&grade) {
            REMARK_FAILED
        } else {
            REMARK_INVALID_GRADE
        }
    }
}

pub fn generate_summary(entry: &ComparisonEntry, curriculum: &[CurriculumEntry]) -> String {
    let mut lines = Vec::with_capacity(4);

    let code_matches = curriculum
        .iter()
        .filter(|c| c.subject_code == entry.subject_code)
        .count();
    lines.push(match code_matches {
        0 => "⚠ Subject code: not found in curriculum".to_string(),
        1 => "✓ Subject code: exact match in curriculum".to_string(),
        n => format!("⚠ Subject code: {n} curriculum matches, review needed"),
    });

    let mut best: Option<(&str, f64)> = None;
    for subject in curriculum {
        for description in &subject.description {
            let score = similarity::ratio(&entry.subject_description, description);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((subject.subject_code.as_str(), score));
            }
        }
    }
    lines.push(match best {
        Some((code, score)) if score >= 80.0 => format!("✓ Description: {score:.1}% match with {code}"),
        Some((code, score)) if score >= 50.0 => {
            format!("⚠ Description: {score:.1}% match with {code}, review needed")
        }
        _ => format!(
            "✗ Description: low similarity ({:.1}%)",
            best.map_or(0.0, |(_, s)| s)
        ),
    });

    let units = entry.total_academic_units as i32;
    if curriculum.iter().any(|c| c.units == units) {
        lines.push(format!("✓ Units: {units} units matches curriculum"));
    } else {
        lines.push(format!("⚠ Units: {units} units, verify equivalency"));
    }

    if entry.is_passing_grade() {
        lines.push(format!("✓ Grade: {} (passing)", entry.final_grade));
    } else {
        lines.push(format!("✗ Grade: {} (not passing)", entry.final_grade));
    }

    lines.join("\n")
}

/// Grades every comparison row of the account on `scale`, writing remarks and
/// a fresh summary.
#[tracing::instrument(skip(store))]
pub async fn apply_grading<S>(store: &mut S, account_id: &str, scale: GradingScale) -> Result<Vec<ComparisonEntry>>
where
    S: ComparisonStore + ?Sized,
{
    require_account(account_id)?;
    store.lock_account(account_id).await?;
    let mut entries = store.comparisons(account_id).await?;
    if entries.is_empty() {
        return Err(Error::not_found("TOR entries", account_id));
    }
    let curriculum = store.active_curriculum().await?;

    for entry in entries.iter_mut() {
        entry.remarks = scale.remarks_for(entry.final_grade).to_string();
        entry.summary = generate_summary(entry, &curriculum);
        store.save_grading(entry.id, &entry.remarks, &entry.summary).await?;
    }

    tracing::info!(account_id, graded = entries.len(), ?scale, "applied grading");
    Ok(entries)
}
