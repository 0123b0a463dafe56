//! In-memory `ComparisonStore` and fixtures for exercising the workflow
//! without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::pkg::internal::adaptors::{
    comparisons::spec::{ComparisonEntry, CreditEvaluation, NewComparison, REMARK_FAILED},
    curriculum::spec::CurriculumEntry,
    transferees::spec::TransfereeEntry,
};
use crate::pkg::internal::tor::store::ComparisonStore;
use crate::prelude::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub transferees: Vec<TransfereeEntry>,
    pub rows: BTreeMap<i64, ComparisonEntry>,
    pub curriculum: Vec<CurriculumEntry>,
    /// every call fails with `StorageUnavailable` while set
    pub unavailable: bool,
    pub locked: Vec<String>,
    next_id: i64,
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn comparison(id: i64, account_id: &str, subject_code: &str, description: &str, grade: f64) -> ComparisonEntry {
    ComparisonEntry {
        id,
        account_id: account_id.into(),
        subject_code: subject_code.into(),
        subject_description: description.into(),
        total_academic_units: 3.0,
        final_grade: grade,
        remarks: "PASSED".into(),
        summary: String::new(),
        credit_evaluation: CreditEvaluation::Accepted,
        notes: None,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn transferee(id: i64, account_id: &str, subject_code: &str, grade: f64) -> TransfereeEntry {
    TransfereeEntry {
        id,
        account_id: account_id.into(),
        subject_code: subject_code.into(),
        subject_description: format!("{subject_code} description"),
        total_academic_units: 3.0,
        final_grade: grade,
        remarks: None,
        created_at: epoch(),
    }
}

pub fn curriculum(id: i64, subject_code: &str, descriptions: &[&str], units: i32) -> CurriculumEntry {
    CurriculumEntry {
        id,
        subject_code: subject_code.into(),
        description: descriptions.iter().map(|d| d.to_string()).collect(),
        units,
        is_active: true,
    }
}

/// Account `A1` with subjects `S1..=S11`, all passed and accepted.
pub fn numbered_account() -> MemoryStore {
    MemoryStore::with_rows(
        (1..=11)
            .map(|i| comparison(i, "A1", &format!("S{i}"), &format!("Subject {i}"), 1.5))
            .collect(),
    )
}

/// Account `A1` as it looks after the student has seen their results: eleven
/// ICS and general education subjects, plus one unrelated account.
pub fn ics_account() -> MemoryStore {
    let subjects = [
        ("ICS 101", "Introduction to Computing", 1.5),
        ("ICS 101L", "Introduction to Computing Laboratory", 1.25),
        ("ICS 102", "Computer Programming 1", 3.5),
        ("ICS 102L", "Computer Programming 1 Laboratory", 2.0),
        ("ICS 103", "Discrete Structures", 1.75),
        ("ICS 104", "Data Structures and Algorithms", 2.25),
        ("MATH 101", "College Algebra", 5.0),
        ("ENG 101", "Purposive Communication", 1.5),
        ("PE 101", "Physical Fitness", 1.0),
        ("NSTP 101", "National Service Training Program 1", 1.25),
        ("HIST 101", "Readings in Philippine History", 2.5),
    ];
    let mut rows: Vec<ComparisonEntry> = subjects
        .iter()
        .enumerate()
        .map(|(i, (code, desc, grade))| comparison(i as i64 + 1, "A1", code, desc, *grade))
        .collect();
    rows.push(comparison(100, "B7", "ICS 102", "Computer Programming 1", 3.5));
    MemoryStore::with_rows(rows)
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<ComparisonEntry>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        MemoryStore {
            rows: rows.into_iter().map(|r| (r.id, r)).collect(),
            next_id,
            ..Default::default()
        }
    }

    pub fn account_rows(&self, account_id: &str) -> Vec<ComparisonEntry> {
        self.rows
            .values()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn row(&self, account_id: &str, subject_code: &str) -> Option<&ComparisonEntry> {
        self.rows
            .values()
            .find(|r| r.account_id == account_id && r.subject_code == subject_code)
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::StorageUnavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn touch(row: &mut ComparisonEntry) {
        row.updated_at = Utc::now().max(row.updated_at + Duration::microseconds(1));
    }

    fn row_mut(&mut self, id: i64) -> Option<&mut ComparisonEntry> {
        self.rows.get_mut(&id)
    }
}

#[async_trait]
impl ComparisonStore for MemoryStore {
    async fn lock_account(&mut self, account_id: &str) -> Result<()> {
        self.check()?;
        self.locked.push(account_id.to_string());
        Ok(())
    }

    async fn transferee_entries(&mut self, account_id: &str) -> Result<Vec<TransfereeEntry>> {
        self.check()?;
        Ok(self
            .transferees
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn comparisons(&mut self, account_id: &str) -> Result<Vec<ComparisonEntry>> {
        self.check()?;
        let mut rows = self.account_rows(account_id);
        rows.sort_by(|a, b| a.subject_code.cmp(&b.subject_code).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn comparison(&mut self, id: i64) -> Result<Option<ComparisonEntry>> {
        self.check()?;
        Ok(self.rows.get(&id).cloned())
    }

    async fn insert_missing(&mut self, entries: Vec<NewComparison>) -> Result<u64> {
        self.check()?;
        let mut created = 0;
        for entry in entries {
            if self.row(&entry.account_id, &entry.subject_code).is_some() {
                continue;
            }
            self.next_id += 1;
            let now = Utc::now();
            self.rows.insert(
                self.next_id,
                ComparisonEntry {
                    id: self.next_id,
                    account_id: entry.account_id,
                    subject_code: entry.subject_code,
                    subject_description: entry.subject_description,
                    total_academic_units: entry.total_academic_units,
                    final_grade: entry.final_grade,
                    remarks: entry.remarks,
                    summary: String::new(),
                    credit_evaluation: CreditEvaluation::Pending,
                    notes: None,
                    created_at: now,
                    updated_at: now,
                },
            );
            created += 1;
        }
        Ok(created)
    }

    async fn mark_failed(&mut self, account_id: &str, subject_codes: &[String]) -> Result<u64> {
        self.check()?;
        let mut marked = 0;
        for row in self.rows.values_mut() {
            if row.account_id == account_id && subject_codes.contains(&row.subject_code) {
                row.remarks = REMARK_FAILED.to_string();
                row.credit_evaluation = CreditEvaluation::Denied;
                Self::touch(row);
                marked += 1;
            }
        }
        Ok(marked)
    }

    async fn set_remarks(&mut self, account_id: &str, subject_code: &str, remarks: &str) -> Result<u64> {
        self.check()?;
        let mut updated = 0;
        for row in self.rows.values_mut() {
            if row.account_id == account_id && row.subject_code == subject_code {
                row.remarks = remarks.to_string();
                Self::touch(row);
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn save_grading(&mut self, id: i64, remarks: &str, summary: &str) -> Result<()> {
        self.check()?;
        if let Some(row) = self.row_mut(id) {
            row.remarks = remarks.to_string();
            row.summary = summary.to_string();
            Self::touch(row);
        }
        Ok(())
    }

    async fn save_matching(&mut self, id: i64, summary: &str, evaluation: CreditEvaluation) -> Result<()> {
        self.check()?;
        if let Some(row) = self.row_mut(id) {
            row.summary = summary.to_string();
            row.credit_evaluation = evaluation;
            Self::touch(row);
        }
        Ok(())
    }

    async fn set_credit_evaluation(
        &mut self,
        id: i64,
        evaluation: CreditEvaluation,
        notes: Option<&str>,
    ) -> Result<Option<ComparisonEntry>> {
        self.check()?;
        Ok(self.row_mut(id).map(|row| {
            row.credit_evaluation = evaluation;
            if let Some(notes) = notes {
                row.notes = Some(notes.to_string());
            }
            Self::touch(row);
            row.clone()
        }))
    }

    async fn active_curriculum(&mut self) -> Result<Vec<CurriculumEntry>> {
        self.check()?;
        Ok(self.curriculum.iter().filter(|c| c.is_active).cloned().collect())
    }
}
