//! emr-core: Patient directory and query triage for the EMR support assistant
//!
//! This crate holds everything that does not need a network or a web
//! framework: the read-only patient directory, the fuzzy name matcher,
//! and the keyword triage used by the doctor and admin views.

pub mod directory;
pub mod error;
pub mod fuzzy;
pub mod triage;

pub use directory::{PatientDirectory, PatientRecord, title_case};
pub use error::EmrError;
pub use fuzzy::{DEFAULT_CUTOFF, closest_name, closest_name_with_cutoff, ratio};
pub use triage::{
    AdminTriage, DoctorTriage, LOGIN_FAILED_REPLY, PATIENT_NOT_FOUND, SERVER_ERROR_REPLY,
    normalize_query, triage_admin, triage_doctor,
};
