use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::conf::settings;
use crate::pkg::internal::adaptors::{
    comparisons::spec::ComparisonEntry,
    transferees::{
        mutators::TransfereeMutator,
        spec::{CreateTransfereeData, TransfereeEntry},
    },
};
use crate::pkg::internal::tor::{
    grading::{GradingScale, apply_grading},
    matching::{MatchResult, sync_curriculum_matching},
    reconcile::{PassedSubject, TorResultCounts, update_tor_results},
    service::{
        ComparisonStatistics, TrackerEntry, comparison_statistics, copy_tor_entries,
        tracker_accreditation, update_credit_evaluation,
    },
};
use crate::{
    pkg::server::state::{AppState, GetTxn},
    prelude::{Error, Result},
};

#[derive(Deserialize)]
pub struct GradingInput {
    /// falls back to the configured scale when absent
    #[serde(default)]
    pub scale: Option<GradingScale>,
}

impl GradingInput {
    pub fn scale_or(&self, default: GradingScale) -> GradingScale {
        self.scale.unwrap_or(default)
    }
}

#[derive(Deserialize)]
pub struct CompleteInput {
    #[serde(default)]
    pub failed_subjects: Vec<String>,
    #[serde(default)]
    pub passed_subjects: Vec<PassedSubject>,
}

#[derive(Deserialize)]
pub struct EvaluationInput {
    pub evaluation: String,
    pub notes: Option<String>,
}

/// Stores uploaded transcript lines for the account.
pub async fn ingest_transferee(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(entries): Json<Vec<CreateTransfereeData>>,
) -> Result<Json<Vec<TransfereeEntry>>> {
    if entries.iter().any(|e| e.subject_code.trim().is_empty()) {
        return Err(Error::Validation("subject code is required".into()));
    }
    let mut tx = state.db_pool.begin_txn().await?;
    let rows = TransfereeMutator::new(&mut tx)
        .bulk_create(&account_id, entries)
        .await?;
    tx.commit().await?;
    tracing::info!(%account_id, ingested = rows.len(), "stored transferee TOR entries");
    Ok(Json(rows))
}

pub async fn copy(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<ComparisonEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let rows = copy_tor_entries(&mut *tx, &account_id).await?;
    tx.commit().await?;
    Ok(Json(rows))
}

pub async fn grade(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(input): Json<GradingInput>,
) -> Result<Json<Vec<ComparisonEntry>>> {
    let scale = input.scale_or(settings.grading_scale);
    let mut tx = state.db_pool.begin_txn().await?;
    let rows = apply_grading(&mut *tx, &account_id, scale).await?;
    tx.commit().await?;
    Ok(Json(rows))
}

pub async fn sync(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<MatchResult>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let results =
        sync_curriculum_matching(&mut *tx, &account_id, settings.similarity_threshold).await?;
    tx.commit().await?;
    Ok(Json(results))
}

/// The student's "Completed" action. Every change commits together or not at
/// all, so a failed attempt can simply be retried.
pub async fn complete(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(input): Json<CompleteInput>,
) -> Result<Json<TorResultCounts>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let counts = update_tor_results(
        &mut *tx,
        &account_id,
        &input.failed_subjects,
        &input.passed_subjects,
    )
    .await?;
    tx.commit().await?;
    Ok(Json(counts))
}

pub async fn set_evaluation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<EvaluationInput>,
) -> Result<Json<ComparisonEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let entry =
        update_credit_evaluation(&mut *tx, id, &input.evaluation, input.notes.as_deref()).await?;
    tx.commit().await?;
    Ok(Json(entry))
}

pub async fn statistics(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<ComparisonStatistics>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let stats = comparison_statistics(&mut *tx, &account_id).await?;
    Ok(Json(stats))
}

pub async fn tracker(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<TrackerEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let entries = tracker_accreditation(&mut *tx, &account_id).await?;
    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_body_selects_scale() {
        let input: GradingInput = serde_json::from_str(r#"{"scale":"reverse"}"#).unwrap();
        assert_eq!(input.scale_or(GradingScale::Standard), GradingScale::Reverse);

        let input: GradingInput = serde_json::from_str(r#"{"scale":"standard"}"#).unwrap();
        assert_eq!(input.scale_or(GradingScale::Reverse), GradingScale::Standard);
    }

    #[test]
    fn grading_body_without_scale_uses_default() {
        let input: GradingInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.scale_or(GradingScale::Reverse), GradingScale::Reverse);
    }

    #[test]
    fn grading_body_rejects_unknown_scale() {
        assert!(serde_json::from_str::<GradingInput>(r#"{"scale":"inverted"}"#).is_err());
    }

    #[test]
    fn completion_body_fields_are_optional() {
        let input: CompleteInput =
            serde_json::from_str(r#"{"failed_subjects":["ICS 102"]}"#).unwrap();
        assert_eq!(input.failed_subjects, vec!["ICS 102".to_string()]);
        assert!(input.passed_subjects.is_empty());
    }
}
