use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A raw transcript line as uploaded for a transferee account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransfereeEntry {
    pub id: i64,
    pub account_id: String,
    pub subject_code: String,
    pub subject_description: String,
    pub total_academic_units: f64,
    pub final_grade: f64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransfereeData {
    pub subject_code: String,
    #[serde(default)]
    pub subject_description: String,
    #[serde(default)]
    pub total_academic_units: f64,
    pub final_grade: f64,
    pub remarks: Option<String>,
}
