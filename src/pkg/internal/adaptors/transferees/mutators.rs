use sqlx::PgConnection;

use crate::pkg::internal::adaptors::transferees::spec::{CreateTransfereeData, TransfereeEntry};
use crate::prelude::Result;

pub struct TransfereeMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> TransfereeMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        TransfereeMutator { pool }
    }

    pub async fn bulk_create(
        &mut self,
        account_id: &str,
        entries: Vec<CreateTransfereeData>,
    ) -> Result<Vec<TransfereeEntry>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO tor_transferee (account_id, subject_code, subject_description, total_academic_units, final_grade, remarks) ",
        );
        query_builder.push_values(entries, |mut b, entry| {
            b.push_bind(account_id.to_string())
                .push_bind(entry.subject_code)
                .push_bind(entry.subject_description)
                .push_bind(entry.total_academic_units)
                .push_bind(entry.final_grade)
                .push_bind(entry.remarks);
        });
        query_builder.push(
            " RETURNING id, account_id, subject_code, subject_description, total_academic_units, final_grade, remarks, created_at",
        );
        let rows = query_builder
            .build_query_as::<TransfereeEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }
}
