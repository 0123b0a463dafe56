//! The "Completed" step of the accreditation workflow.
//!
//! Failed subjects are marked in place (`remarks = FAILED`,
//! `credit_evaluation = DENIED`). Rows are never removed here: the department
//! view reads the same table and must see every subject the student took.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pkg::internal::tor::{service::require_account, store::ComparisonStore};
use crate::prelude::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassedSubject {
    pub subject_code: String,
    pub remarks: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TorResultCounts {
    /// rows marked failed
    pub failed: u64,
    /// rows whose remarks were set from `passed_subjects`
    pub updated: u64,
}

/// Marks the account's rows whose subject code is in `failed_subjects` as
/// failed and denied, returning how many rows matched.
///
/// Codes with no row are skipped. Running it again with the same input gives
/// the same remarks and evaluations; only `updated_at` moves.
#[tracing::instrument(skip(store, failed_subjects), fields(requested = failed_subjects.len()))]
pub async fn reconcile<S>(store: &mut S, account_id: &str, failed_subjects: &[String]) -> Result<u64>
where
    S: ComparisonStore + ?Sized,
{
    if failed_subjects.is_empty() {
        return Ok(0);
    }
    require_account(account_id)?;
    store.lock_account(account_id).await?;
    mark_failed_subjects(store, account_id, failed_subjects).await
}

/// Caller holds the account lock.
async fn mark_failed_subjects<S>(store: &mut S, account_id: &str, failed_subjects: &[String]) -> Result<u64>
where
    S: ComparisonStore + ?Sized,
{
    if failed_subjects.is_empty() {
        return Ok(0);
    }
    let codes: Vec<String> = failed_subjects
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let marked = store.mark_failed(account_id, &codes).await?;
    if (marked as usize) < codes.len() {
        tracing::debug!(
            account_id,
            unmatched = codes.len() - marked as usize,
            "some failed subjects have no comparison row"
        );
    }
    tracing::info!(account_id, marked, "marked failed subjects");
    Ok(marked)
}

/// Records the outcome of the student's "Completed" action: failed subjects
/// are marked as in [`reconcile`], passed subjects get their remarks set.
/// Both happen under one account lock.
///
/// A subject listed in both keeps its failed marking.
#[tracing::instrument(skip(store, failed_subjects, passed_subjects))]
pub async fn update_tor_results<S>(
    store: &mut S,
    account_id: &str,
    failed_subjects: &[String],
    passed_subjects: &[PassedSubject],
) -> Result<TorResultCounts>
where
    S: ComparisonStore + ?Sized,
{
    require_account(account_id)?;
    if failed_subjects.is_empty() && passed_subjects.is_empty() {
        return Ok(TorResultCounts::default());
    }
    store.lock_account(account_id).await?;
    let failed = mark_failed_subjects(store, account_id, failed_subjects).await?;

    let mut updated = 0;
    for subject in passed_subjects {
        if failed_subjects.contains(&subject.subject_code) {
            continue;
        }
        updated += store
            .set_remarks(account_id, &subject.subject_code, &subject.remarks)
            .await?;
    }

    tracing::info!(account_id, failed, updated, "updated TOR results");
    Ok(TorResultCounts { failed, updated })
}
