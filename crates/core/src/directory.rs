//! Read-only patient directory

use serde::{Deserialize, Serialize};

use crate::error::EmrError;

/// A single patient record. Names are stored lower-cased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    pub name: String,
    pub age: u32,
    pub last_visit: String,
    pub diagnosis: String,
}

impl PatientRecord {
    pub fn new(name: &str, age: u32, last_visit: &str, diagnosis: &str) -> Self {
        Self {
            name: normalize_name(name),
            age,
            last_visit: last_visit.to_string(),
            diagnosis: diagnosis.to_string(),
        }
    }

    /// Name as shown to users, e.g. "ravi kumar" -> "Ravi Kumar"
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }

    /// "Age 32, Last Visit - Oct 5, Diagnosis - Diabetes."
    pub fn summary(&self) -> String {
        format!(
            "Age {}, Last Visit - {}, Diagnosis - {}.",
            self.age, self.last_visit, self.diagnosis
        )
    }
}

/// Fixed set of patients, kept in insertion order.
///
/// Order matters: substring matching walks the records front to back and
/// stops at the first hit.
#[derive(Debug, Clone)]
pub struct PatientDirectory {
    records: Vec<PatientRecord>,
}

impl PatientDirectory {
    /// Build a directory, rejecting blank or duplicate names
    pub fn new(records: Vec<PatientRecord>) -> Result<Self, EmrError> {
        let mut seen: Vec<&str> = Vec::with_capacity(records.len());
        for record in &records {
            if record.name.is_empty() {
                return Err(EmrError::BlankName);
            }
            if seen.contains(&record.name.as_str()) {
                return Err(EmrError::DuplicateName(record.name.clone()));
            }
            seen.push(&record.name);
        }

        Ok(Self { records })
    }

    /// The four built-in patients
    pub fn seeded() -> Self {
        Self {
            records: vec![
                PatientRecord::new("john doe", 45, "Oct 10", "Hypertension"),
                PatientRecord::new("emma", 32, "Oct 5", "Diabetes"),
                PatientRecord::new("ravi kumar", 50, "Oct 12", "Asthma"),
                PatientRecord::new("anita", 28, "Oct 15", "Migraine"),
            ],
        }
    }

    /// Exact lookup on the normalized name
    pub fn lookup(&self, name: &str) -> Option<&PatientRecord> {
        let key = normalize_name(name);
        self.records.iter().find(|r| r.name == key)
    }

    /// Known names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PatientDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
