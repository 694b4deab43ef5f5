//! Login and logout handlers

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::AppState;
use crate::error::AppError;
use crate::routes::found;
use crate::session::{self, Role, SessionState, UnknownRole};

pub const MISSING_DETAILS: &str = "Missing login details. Please go back and fill in all fields.";
pub const UNKNOWN_ROLE: &str = "Unknown role. Please go back and choose doctor or admin.";

/// Login form fields; both are free text
#[derive(Debug, Deserialize, Default)]
pub struct LoginForm {
    pub username: Option<String>,
    pub role: Option<String>,
}

/// Trimmed value, or `None` when missing or blank
fn field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// GET / - Login page
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.login()?))
}

/// POST / - Record identity and role, then go to the role's dashboard
pub async fn submit(
    session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    // A body that is not a form counts as missing fields
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let (Some(username), Some(role)) = (
        field(form.username.as_deref()),
        field(form.role.as_deref()),
    ) else {
        return Ok(MISSING_DETAILS.into_response());
    };

    let role: Role = match role.parse() {
        Ok(role) => role,
        Err(UnknownRole(given)) => {
            tracing::info!(role = %given, "Login rejected: unrecognized role");
            return Ok(UNKNOWN_ROLE.into_response());
        }
    };

    let state = SessionState {
        username: username.to_string(),
        role,
    };
    session::store(&session, &state).await?;
    tracing::info!(role = %role, "User logged in");

    Ok(found(role.dashboard_path()))
}

/// GET /logout - Forget the session and return to the login page
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session::clear(&session).await?;
    Ok(found("/"))
}
