use sqlx::PgConnection;

use crate::pkg::internal::adaptors::comparisons::spec::ComparisonEntry;
use crate::prelude::Result;

pub struct ComparisonSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ComparisonSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ComparisonSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<ComparisonEntry>> {
        let row = sqlx::query_as::<_, ComparisonEntry>(
            "SELECT id, account_id, subject_code, subject_description, total_academic_units, final_grade,
                    remarks, summary, credit_evaluation, notes, created_at, updated_at
             FROM compare_result_tor WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_account(&mut self, account_id: &str) -> Result<Vec<ComparisonEntry>> {
        let rows = sqlx::query_as::<_, ComparisonEntry>(
            "SELECT id, account_id, subject_code, subject_description, total_academic_units, final_grade,
                    remarks, summary, credit_evaluation, notes, created_at, updated_at
             FROM compare_result_tor WHERE account_id = $1 ORDER BY subject_code, id",
        )
        .bind(account_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_by_account(&mut self, account_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM compare_result_tor WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(&mut *self.pool)
                .await?;
        Ok(count)
    }
}
