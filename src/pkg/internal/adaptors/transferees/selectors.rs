use sqlx::PgConnection;

use crate::pkg::internal::adaptors::transferees::spec::TransfereeEntry;
use crate::prelude::Result;

pub struct TransfereeSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> TransfereeSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        TransfereeSelector { pool }
    }

    pub async fn get_by_account(&mut self, account_id: &str) -> Result<Vec<TransfereeEntry>> {
        let rows = sqlx::query_as::<_, TransfereeEntry>(
            "SELECT id, account_id, subject_code, subject_description, total_academic_units,
                    final_grade, remarks, created_at
             FROM tor_transferee WHERE account_id = $1 ORDER BY id",
        )
        .bind(account_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
