//! Keyword triage for free-text queries
//!
//! Decides whether a query can be answered locally or has to be handed to
//! the completion service. Queries are expected to be normalized with
//! [`normalize_query`] first; matching is plain substring containment.

use crate::directory::{PatientDirectory, PatientRecord};
use crate::fuzzy;

const PATIENT_KEYWORD: &str = "patient";
const LOGIN_FAILED_KEYWORD: &str = "login failed";
const ERROR_KEYWORD: &str = "error";

pub const PATIENT_NOT_FOUND: &str = "Patient not found in database.";
pub const LOGIN_FAILED_REPLY: &str = "Try resetting your password or check network connectivity.";
pub const SERVER_ERROR_REPLY: &str = "Check server connection or contact system admin.";

/// Lower-case a raw query before triage
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase()
}

/// Outcome of triaging a doctor's query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorTriage<'a> {
    /// A directory name appears verbatim in the query
    Found(&'a PatientRecord),
    /// No verbatim name, but the query is close enough to one
    DidYouMean(&'a PatientRecord),
    /// Asked about a patient we could not identify
    NotFound,
    /// Not a patient question; hand it to the completion service
    Delegate,
}

impl DoctorTriage<'_> {
    /// Reply text for outcomes answered locally
    pub fn reply(&self) -> Option<String> {
        match self {
            DoctorTriage::Found(record) => Some(format!(
                "Patient {}: {}",
                record.display_name(),
                record.summary()
            )),
            DoctorTriage::DidYouMean(record) => Some(format!(
                "(Did you mean {}?) {}",
                record.display_name(),
                record.summary()
            )),
            DoctorTriage::NotFound => Some(PATIENT_NOT_FOUND.to_string()),
            DoctorTriage::Delegate => None,
        }
    }

    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            DoctorTriage::Found(_) => "directory",
            DoctorTriage::DidYouMean(_) => "fuzzy",
            DoctorTriage::NotFound => "not_found",
            DoctorTriage::Delegate => "delegate",
        }
    }
}

/// Triage a normalized doctor query against the directory.
///
/// When several names appear in the query, the one earliest in the
/// directory's insertion order wins, not the one earliest in the query.
pub fn triage_doctor<'a>(query: &str, directory: &'a PatientDirectory) -> DoctorTriage<'a> {
    if !query.contains(PATIENT_KEYWORD) {
        return DoctorTriage::Delegate;
    }

    if let Some(record) = directory
        .records()
        .iter()
        .find(|r| query.contains(r.name.as_str()))
    {
        return DoctorTriage::Found(record);
    }

    match fuzzy::closest_name(query, directory.names()).and_then(|name| directory.lookup(name)) {
        Some(record) => DoctorTriage::DidYouMean(record),
        None => DoctorTriage::NotFound,
    }
}

/// Outcome of triaging an admin's query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTriage {
    LoginFailed,
    ServerError,
    Delegate,
}

impl AdminTriage {
    pub fn reply(&self) -> Option<&'static str> {
        match self {
            AdminTriage::LoginFailed => Some(LOGIN_FAILED_REPLY),
            AdminTriage::ServerError => Some(SERVER_ERROR_REPLY),
            AdminTriage::Delegate => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminTriage::LoginFailed => "login_failed",
            AdminTriage::ServerError => "error",
            AdminTriage::Delegate => "delegate",
        }
    }
}

/// Triage a normalized admin query. "login failed" takes precedence over "error".
pub fn triage_admin(query: &str) -> AdminTriage {
    if query.contains(LOGIN_FAILED_KEYWORD) {
        AdminTriage::LoginFailed
    } else if query.contains(ERROR_KEYWORD) {
        AdminTriage::ServerError
    } else {
        AdminTriage::Delegate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor_reply(raw: &str) -> Option<String> {
        let directory = PatientDirectory::seeded();
        triage_doctor(&normalize_query(raw), &directory).reply()
    }

    #[test]
    fn every_seed_patient_is_found_by_name() {
        let directory = PatientDirectory::seeded();
        for record in directory.records() {
            let query = format!("show patient {}", record.name);
            match triage_doctor(&query, &directory) {
                DoctorTriage::Found(found) => assert_eq!(found, record),
                other => panic!("expected Found for {query:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn found_reply_format() {
        assert_eq!(
            doctor_reply("Tell me about patient Emma").as_deref(),
            Some("Patient Emma: Age 32, Last Visit - Oct 5, Diagnosis - Diabetes.")
        );
        assert_eq!(
            doctor_reply("patient ravi kumar status").as_deref(),
            Some("Patient Ravi Kumar: Age 50, Last Visit - Oct 12, Diagnosis - Asthma.")
        );
    }

    #[test]
    fn misspelled_names_get_a_suggestion() {
        assert_eq!(
            doctor_reply("patient ravi kumr").as_deref(),
            Some("(Did you mean Ravi Kumar?) Age 50, Last Visit - Oct 12, Diagnosis - Asthma.")
        );
        assert_eq!(
            doctor_reply("Patient Jon Doe").as_deref(),
            Some("(Did you mean John Doe?) Age 45, Last Visit - Oct 10, Diagnosis - Hypertension.")
        );
    }

    #[test]
    fn unknown_patient_is_not_found() {
        assert_eq!(doctor_reply("patient").as_deref(), Some(PATIENT_NOT_FOUND));
        assert_eq!(doctor_reply("patient xyz").as_deref(), Some(PATIENT_NOT_FOUND));
    }

    #[test]
    fn first_directory_entry_wins_when_several_names_appear() {
        let directory = PatientDirectory::seeded();
        // "anita" comes first in the query, "emma" first in the directory
        let triage = triage_doctor("patient anita and patient emma", &directory);
        assert_eq!(triage, DoctorTriage::Found(directory.lookup("emma").unwrap()));
    }

    #[test]
    fn substring_names_match_inside_other_words() {
        let directory = PatientDirectory::seeded();
        let triage = triage_doctor("patient gemma", &directory);
        assert_eq!(triage, DoctorTriage::Found(directory.lookup("emma").unwrap()));
    }

    #[test]
    fn queries_without_patient_are_delegated() {
        let directory = PatientDirectory::seeded();
        assert_eq!(
            triage_doctor("what is the dose for emma", &directory),
            DoctorTriage::Delegate
        );
        assert_eq!(doctor_reply("how do I chart vitals?"), None);
    }

    #[test]
    fn admin_keywords_in_priority_order() {
        assert_eq!(triage_admin("login failed for user"), AdminTriage::LoginFailed);
        assert_eq!(
            triage_admin("error: login failed again"),
            AdminTriage::LoginFailed
        );
        assert_eq!(triage_admin("server error 500"), AdminTriage::ServerError);
        assert_eq!(triage_admin("how do i add a user"), AdminTriage::Delegate);
        assert_eq!(AdminTriage::Delegate.reply(), None);
        assert_eq!(AdminTriage::LoginFailed.reply(), Some(LOGIN_FAILED_REPLY));
    }

    #[test]
    fn admin_triage_expects_normalized_input() {
        assert_eq!(triage_admin("LOGIN FAILED"), AdminTriage::Delegate);
        assert_eq!(
            triage_admin(&normalize_query("LOGIN FAILED")),
            AdminTriage::LoginFailed
        );
    }
}
