use sqlx::PgConnection;

use crate::pkg::internal::adaptors::comparisons::spec::{
    ComparisonEntry, CreditEvaluation, NewComparison, REMARK_FAILED,
};
use crate::prelude::Result;

/// Write access to `compare_result_tor`. Rows are only inserted or updated in
/// place; the workflow never removes them, so there is no delete here.
pub struct ComparisonMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ComparisonMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ComparisonMutator { pool }
    }

    /// Inserts the rows whose `(account_id, subject_code)` is not present yet
    /// and returns how many were created.
    pub async fn insert_missing(&mut self, entries: Vec<NewComparison>) -> Result<u64> {
        if entries.is_empty() {
            return Ok(0);
        }
        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO compare_result_tor (account_id, subject_code, subject_description, total_academic_units, final_grade, remarks, summary, credit_evaluation) ",
        );
        query_builder.push_values(entries, |mut b, entry| {
            b.push_bind(entry.account_id)
                .push_bind(entry.subject_code)
                .push_bind(entry.subject_description)
                .push_bind(entry.total_academic_units)
                .push_bind(entry.final_grade)
                .push_bind(entry.remarks)
                .push_bind("")
                .push_bind(CreditEvaluation::Pending);
        });
        query_builder.push(" ON CONFLICT (account_id, subject_code) DO NOTHING");
        let result = query_builder.build().execute(&mut *self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Marks every listed subject of the account as failed and denied in a
    /// single statement. Codes without a row are ignored.
    pub async fn mark_failed(&mut self, account_id: &str, subject_codes: &[String]) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE compare_result_tor
            SET remarks = $3, credit_evaluation = $4, updated_at = clock_timestamp()
            WHERE account_id = $1 AND subject_code = ANY($2)
            "#,
        )
        .bind(account_id)
        .bind(subject_codes)
        .bind(REMARK_FAILED)
        .bind(CreditEvaluation::Denied)
        .execute(&mut *self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn set_remarks(&mut self, account_id: &str, subject_code: &str, remarks: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE compare_result_tor
            SET remarks = $3, updated_at = clock_timestamp()
            WHERE account_id = $1 AND subject_code = $2
            "#,
        )
        .bind(account_id)
        .bind(subject_code)
        .bind(remarks)
        .execute(&mut *self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn save_grading(&mut self, id: i64, remarks: &str, summary: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE compare_result_tor
            SET remarks = $2, summary = $3, updated_at = clock_timestamp()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(remarks)
        .bind(summary)
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }

    pub async fn save_matching(&mut self, id: i64, summary: &str, evaluation: CreditEvaluation) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE compare_result_tor
            SET summary = $2, credit_evaluation = $3, updated_at = clock_timestamp()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(summary)
        .bind(evaluation)
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }

    /// Sets the evaluation of one row; `notes` is only overwritten when given.
    pub async fn set_credit_evaluation(
        &mut self,
        id: i64,
        evaluation: CreditEvaluation,
        notes: Option<&str>,
    ) -> Result<Option<ComparisonEntry>> {
        let row = sqlx::query_as::<_, ComparisonEntry>(
            r#"
            UPDATE compare_result_tor
            SET credit_evaluation = $2, notes = COALESCE($3, notes), updated_at = clock_timestamp()
            WHERE id = $1
            RETURNING id, account_id, subject_code, subject_description, total_academic_units, final_grade,
                      remarks, summary, credit_evaluation, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(evaluation)
        .bind(notes)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
