use std::collections::HashSet;

use serde::Serialize;

use crate::pkg::internal::adaptors::comparisons::spec::{
    ComparisonEntry, CreditEvaluation, NewComparison, REMARK_FAILED, REMARK_PASSED,
};
use crate::pkg::internal::tor::store::ComparisonStore;
use crate::prelude::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonStatistics {
    pub total: usize,
    pub accepted: usize,
    pub denied: usize,
    pub void: usize,
    pub investigate: usize,
    pub pending: usize,
    pub passed: usize,
    pub failed: usize,
    pub average_grade: f64,
    pub total_units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerEntry {
    pub account_id: String,
    pub subject_code: String,
    pub subject_description: String,
    pub credit_evaluation: CreditEvaluation,
}

/// One line of the department's accreditation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentRow {
    pub subject_code: String,
    pub description: String,
    pub units: f64,
    pub final_grade: f64,
    pub credit_evaluation: String,
    pub remarks: String,
}

impl From<ComparisonEntry> for DepartmentRow {
    fn from(entry: ComparisonEntry) -> Self {
        DepartmentRow {
            credit_evaluation: entry.credit_evaluation.label().to_string(),
            remarks: remarks_label(&entry.remarks),
            subject_code: entry.subject_code,
            description: entry.subject_description,
            units: entry.total_academic_units,
            final_grade: entry.final_grade,
        }
    }
}

/// `FAILED` -> `Failed`, `INVALID GRADE` -> `Invalid Grade`; mixed case is
/// shown as entered.
fn remarks_label(remarks: &str) -> String {
    if remarks.chars().any(|c| c.is_lowercase()) {
        return remarks.to_string();
    }
    remarks
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Rejects blank account ids.
pub(crate) fn require_account(account_id: &str) -> Result<()> {
    if account_id.trim().is_empty() {
        return Err(Error::Validation("account id is required".into()));
    }
    Ok(())
}

/// "See Result": creates a comparison row for every uploaded transcript line
/// of the account that does not have one yet, then returns all of the
/// account's rows. Existing rows are left as they are.
#[tracing::instrument(skip(store))]
pub async fn copy_tor_entries<S>(store: &mut S, account_id: &str) -> Result<Vec<ComparisonEntry>>
where
    S: ComparisonStore + ?Sized,
{
    require_account(account_id)?;
    store.lock_account(account_id).await?;
    let transferees = store.transferee_entries(account_id).await?;
    if transferees.is_empty() {
        return Err(Error::not_found("transferee TOR entries", account_id));
    }

    let mut seen = HashSet::new();
    let entries: Vec<NewComparison> = transferees
        .into_iter()
        .filter(|t| seen.insert(t.subject_code.clone()))
        .map(|t| NewComparison {
            account_id: t.account_id,
            subject_code: t.subject_code,
            subject_description: t.subject_description,
            total_academic_units: t.total_academic_units,
            final_grade: t.final_grade,
            remarks: t.remarks.unwrap_or_default(),
        })
        .collect();

    let created = store.insert_missing(entries).await?;
    let rows = store.comparisons(account_id).await?;
    tracing::info!(account_id, created, total = rows.len(), "copied TOR entries");
    Ok(rows)
}

#[tracing::instrument(skip(store, notes))]
pub async fn update_credit_evaluation<S>(
    store: &mut S,
    entry_id: i64,
    evaluation: &str,
    notes: Option<&str>,
) -> Result<ComparisonEntry>
where
    S: ComparisonStore + ?Sized,
{
    let evaluation: CreditEvaluation = evaluation.parse()?;
    let entry = store
        .comparison(entry_id)
        .await?
        .ok_or_else(|| Error::not_found("comparison entry", entry_id.to_string()))?;
    store.lock_account(&entry.account_id).await?;
    let updated = store
        .set_credit_evaluation(entry_id, evaluation, notes)
        .await?
        .ok_or_else(|| Error::not_found("comparison entry", entry_id.to_string()))?;
    tracing::info!(entry_id, %evaluation, "updated credit evaluation");
    Ok(updated)
}

pub async fn comparison_statistics<S>(store: &mut S, account_id: &str) -> Result<ComparisonStatistics>
where
    S: ComparisonStore + ?Sized,
{
    let entries = store.comparisons(account_id).await?;
    let mut stats = ComparisonStatistics {
        total: entries.len(),
        ..Default::default()
    };
    for entry in &entries {
        match entry.credit_evaluation {
            CreditEvaluation::Accepted => stats.accepted += 1,
            CreditEvaluation::Denied => stats.denied += 1,
            CreditEvaluation::Void => stats.void += 1,
            CreditEvaluation::Investigate => stats.investigate += 1,
            CreditEvaluation::Pending => stats.pending += 1,
        }
        match entry.remarks.as_str() {
            REMARK_PASSED => stats.passed += 1,
            REMARK_FAILED => stats.failed += 1,
            _ => {}
        }
        stats.total_units += entry.total_academic_units;
    }
    if !entries.is_empty() {
        let sum: f64 = entries.iter().map(|e| e.final_grade).sum();
        stats.average_grade = (sum / entries.len() as f64 * 100.0).round() / 100.0;
    }
    Ok(stats)
}

pub async fn tracker_accreditation<S>(store: &mut S, account_id: &str) -> Result<Vec<TrackerEntry>>
where
    S: ComparisonStore + ?Sized,
{
    let entries = store.comparisons(account_id).await?;
    Ok(entries
        .into_iter()
        .map(|e| TrackerEntry {
            account_id: e.account_id,
            subject_code: e.subject_code,
            subject_description: e.subject_description,
            credit_evaluation: e.credit_evaluation,
        })
        .collect())
}

/// Every comparison row of the account, passed and failed alike.
pub async fn department_view<S>(store: &mut S, account_id: &str) -> Result<Vec<DepartmentRow>>
where
    S: ComparisonStore + ?Sized,
{
    let entries = store.comparisons(account_id).await?;
    tracing::debug!(account_id, rows = entries.len(), "department view");
    Ok(entries.into_iter().map(DepartmentRow::from).collect())
}
