use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::prelude::Error;

pub const REMARK_PASSED: &str = "PASSED";
pub const REMARK_FAILED: &str = "FAILED";
pub const REMARK_INVALID_GRADE: &str = "INVALID GRADE";

/// Whether a transferred subject counts toward the target curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "credit_evaluation", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditEvaluation {
    Accepted,
    Denied,
    Void,
    Investigate,
    Pending,
}

impl CreditEvaluation {
    pub const ALL: [CreditEvaluation; 5] = [
        CreditEvaluation::Accepted,
        CreditEvaluation::Denied,
        CreditEvaluation::Void,
        CreditEvaluation::Investigate,
        CreditEvaluation::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditEvaluation::Accepted => "ACCEPTED",
            CreditEvaluation::Denied => "DENIED",
            CreditEvaluation::Void => "VOID",
            CreditEvaluation::Investigate => "INVESTIGATE",
            CreditEvaluation::Pending => "PENDING",
        }
    }

    /// Label shown on the department view.
    pub fn label(&self) -> &'static str {
        match self {
            CreditEvaluation::Accepted => "Accepted",
            CreditEvaluation::Denied => "Denied",
            CreditEvaluation::Void => "Void",
            CreditEvaluation::Investigate => "Investigate",
            CreditEvaluation::Pending => "Pending",
        }
    }
}

impl fmt::Display for CreditEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditEvaluation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        CreditEvaluation::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = CreditEvaluation::ALL.iter().map(|e| e.as_str()).collect();
                Error::Validation(format!(
                    "invalid evaluation {:?}, must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Per-subject comparison row (`compare_result_tor`). Rows are created by the
/// copy step and only ever updated in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ComparisonEntry {
    pub id: i64,
    pub account_id: String,
    pub subject_code: String,
    pub subject_description: String,
    pub total_academic_units: f64,
    pub final_grade: f64,
    pub remarks: String,
    pub summary: String,
    pub credit_evaluation: CreditEvaluation,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComparisonEntry {
    pub fn is_passing_grade(&self) -> bool {
        (1.0..=2.9).contains(&self.final_grade)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComparison {
    pub account_id: String,
    pub subject_code: String,
    pub subject_description: String,
    pub total_academic_units: f64,
    pub final_grade: f64,
    pub remarks: String,
}
