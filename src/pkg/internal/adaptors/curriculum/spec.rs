use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One subject of the receiving institution's curriculum. A subject may be
/// known under several descriptions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CurriculumEntry {
    pub id: i64,
    pub subject_code: String,
    pub description: Vec<String>,
    pub units: i32,
    pub is_active: bool,
}
