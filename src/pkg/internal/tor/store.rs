use async_trait::async_trait;
use sqlx::PgConnection;

use crate::pkg::internal::adaptors::{
    comparisons::{
        mutators::ComparisonMutator,
        selectors::ComparisonSelector,
        spec::{ComparisonEntry, CreditEvaluation, NewComparison},
    },
    curriculum::{selectors::CurriculumSelector, spec::CurriculumEntry},
    transferees::{selectors::TransfereeSelector, spec::TransfereeEntry},
};
use crate::prelude::Result;

/// Persistence operations used by the TOR workflow.
///
/// Comparison rows can be created and updated but never removed: downstream
/// readers rely on the row set for an account staying complete.
#[async_trait]
pub trait ComparisonStore: Send {
    /// Serialises work on one account until the surrounding unit of work ends.
    async fn lock_account(&mut self, account_id: &str) -> Result<()>;

    async fn transferee_entries(&mut self, account_id: &str) -> Result<Vec<TransfereeEntry>>;

    async fn comparisons(&mut self, account_id: &str) -> Result<Vec<ComparisonEntry>>;

    async fn comparison(&mut self, id: i64) -> Result<Option<ComparisonEntry>>;

    async fn insert_missing(&mut self, entries: Vec<NewComparison>) -> Result<u64>;

    async fn mark_failed(&mut self, account_id: &str, subject_codes: &[String]) -> Result<u64>;

    async fn set_remarks(&mut self, account_id: &str, subject_code: &str, remarks: &str) -> Result<u64>;

    async fn save_grading(&mut self, id: i64, remarks: &str, summary: &str) -> Result<()>;

    async fn save_matching(&mut self, id: i64, summary: &str, evaluation: CreditEvaluation) -> Result<()>;

    async fn set_credit_evaluation(
        &mut self,
        id: i64,
        evaluation: CreditEvaluation,
        notes: Option<&str>,
    ) -> Result<Option<ComparisonEntry>>;

    async fn active_curriculum(&mut self) -> Result<Vec<CurriculumEntry>>;
}

#[async_trait]
impl ComparisonStore for PgConnection {
    async fn lock_account(&mut self, account_id: &str) -> Result<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(account_id)
            .execute(&mut *self)
            .await?;
        Ok(())
    }

    async fn transferee_entries(&mut self, account_id: &str) -> Result<Vec<TransfereeEntry>> {
        TransfereeSelector::new(self).get_by_account(account_id).await
    }

    async fn comparisons(&mut self, account_id: &str) -> Result<Vec<ComparisonEntry>> {
        ComparisonSelector::new(self).get_by_account(account_id).await
    }

    async fn comparison(&mut self, id: i64) -> Result<Option<ComparisonEntry>> {
        ComparisonSelector::new(self).get_by_id(id).await
    }

    async fn insert_missing(&mut self, entries: Vec<NewComparison>) -> Result<u64> {
        ComparisonMutator::new(self).insert_missing(entries).await
    }

    async fn mark_failed(&mut self, account_id: &str, subject_codes: &[String]) -> Result<u64> {
        ComparisonMutator::new(self).mark_failed(account_id, subject_codes).await
    }

    async fn set_remarks(&mut self, account_id: &str, subject_code: &str, remarks: &str) -> Result<u64> {
        ComparisonMutator::new(self)
            .set_remarks(account_id, subject_code, remarks)
            .await
    }

    async fn save_grading(&mut self, id: i64, remarks: &str, summary: &str) -> Result<()> {
        ComparisonMutator::new(self).save_grading(id, remarks, summary).await
    }

    async fn save_matching(&mut self, id: i64, summary: &str, evaluation: CreditEvaluation) -> Result<()> {
        ComparisonMutator::new(self).save_matching(id, summary, evaluation).await
    }

    async fn set_credit_evaluation(
        &mut self,
        id: i64,
        evaluation: CreditEvaluation,
        notes: Option<&str>,
    ) -> Result<Option<ComparisonEntry>> {
        ComparisonMutator::new(self)
            .set_credit_evaluation(id, evaluation, notes)
            .await
    }

    async fn active_curriculum(&mut self) -> Result<Vec<CurriculumEntry>> {
        CurriculumSelector::new(self).get_active().await
    }
}
