//! HTML rendering for the login page and the two dashboards

use emr_core::PatientRecord;
use serde::Serialize;
use tera::{Context, Tera};

use crate::session::SessionState;

/// Templates are compiled into the binary
const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("doctor.html", include_str!("../templates/doctor.html")),
    ("admin.html", include_str!("../templates/admin.html")),
];

/// Row of the doctor's patient table
#[derive(Serialize)]
struct PatientRow<'a> {
    name: String,
    age: u32,
    last_visit: &'a str,
    diagnosis: &'a str,
}

impl<'a> From<&'a PatientRecord> for PatientRow<'a> {
    fn from(record: &'a PatientRecord) -> Self {
        Self {
            name: record.display_name(),
            age: record.age,
            last_visit: &record.last_visit,
            diagnosis: &record.diagnosis,
        }
    }
}

/// Renders pages. Holds no state besides the parsed templates.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn login(&self) -> Result<String, tera::Error> {
        self.tera.render("login.html", &Context::new())
    }

    pub fn doctor(
        &self,
        user: &SessionState,
        response: &str,
        patients: &[PatientRecord],
    ) -> Result<String, tera::Error> {
        let mut context = dashboard_context(user, response);
        let rows: Vec<PatientRow<'_>> = patients.iter().map(PatientRow::from).collect();
        context.insert("patients", &rows);
        self.tera.render("doctor.html", &context)
    }

    pub fn admin(&self, user: &SessionState, response: &str) -> Result<String, tera::Error> {
        self.tera
            .render("admin.html", &dashboard_context(user, response))
    }
}

fn dashboard_context(user: &SessionState, response: &str) -> Context {
    let mut context = Context::new();
    context.insert("response", response);
    context.insert("username", &user.username);
    context.insert("role", user.role.as_str());
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use emr_core::PatientDirectory;

    fn doctor() -> SessionState {
        SessionState {
            username: "drsmith".into(),
            role: Role::Doctor,
        }
    }

    #[test]
    fn doctor_page_shows_reply_identity_and_directory() {
        let views = Views::new().unwrap();
        let directory = PatientDirectory::seeded();
        let html = views
            .doctor(
                &doctor(),
                "Patient Emma: Age 32, Last Visit - Oct 5, Diagnosis - Diabetes.",
                directory.records(),
            )
            .unwrap();

        assert!(html.contains(r#"<div class="response" id="response">Patient Emma: Age 32"#));
        assert!(html.contains("drsmith"));
        assert!(html.contains(r#"<span id="role">doctor</span>"#));
        assert!(
            html.contains("<td>Ravi Kumar</td><td>50</td><td>Oct 12</td><td>Asthma</td>")
        );
        assert!(html.contains("<td>Anita</td><td>28</td><td>Oct 15</td><td>Migraine</td>"));
    }

    #[test]
    fn empty_reply_hides_the_response_box() {
        let views = Views::new().unwrap();
        let html = views.doctor(&doctor(), "", &[]).unwrap();
        assert!(!html.contains(r#"id="response""#));
    }

    #[test]
    fn user_text_is_escaped() {
        let views = Views::new().unwrap();
        let user = SessionState {
            username: "<script>alert(1)</script>".into(),
            role: Role::Admin,
        };
        let html = views.admin(&user, "<b>bold</b>").unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold"));
    }

    #[test]
    fn login_page_has_both_roles() {
        let html = Views::new().unwrap().login().unwrap();
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"<option value="doctor">"#));
        assert!(html.contains(r#"<option value="admin">"#));
    }
}
