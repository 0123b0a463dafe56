use sqlx::PgConnection;

use crate::pkg::internal::adaptors::curriculum::spec::CurriculumEntry;
use crate::prelude::Result;

pub struct CurriculumSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CurriculumSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CurriculumSelector { pool }
    }

    pub async fn get_active(&mut self) -> Result<Vec<CurriculumEntry>> {
        let rows = sqlx::query_as::<_, CurriculumEntry>(
            "SELECT id, subject_code, description, units, is_active
             FROM cit_tor_content WHERE is_active = TRUE ORDER BY subject_code",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
