//! Doctor and admin dashboards
//!
//! Both routes sit behind the role gate, which puts a [`CurrentUser`] into
//! the request extensions before these handlers run.

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::session::CurrentUser;

/// Dashboard query form
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    pub query: Option<String>,
}

/// Pull the required `query` field out of a submitted form
fn required_query(form: Result<Form<QueryForm>, FormRejection>) -> Result<String, AppError> {
    form.ok()
        .and_then(|Form(f)| f.query)
        .ok_or_else(|| AppError::BadRequest("Missing required form field: query".to_string()))
}

/// GET /doctor
pub async fn doctor_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    render_doctor(&state, &user, "")
}

/// POST /doctor - Answer a doctor's query
pub async fn doctor_query(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    form: Result<Form<QueryForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let query = required_query(form)?;
    let response = state.assistant.answer_doctor(&query).await;
    render_doctor(&state, &user, &response)
}

/// GET /admin
pub async fn admin_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.admin(&user.0, "")?))
}

/// POST /admin - Answer an admin's query
pub async fn admin_query(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    form: Result<Form<QueryForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let query = required_query(form)?;
    let response = state.assistant.answer_admin(&query).await;
    Ok(Html(state.views.admin(&user.0, &response)?))
}

fn render_doctor(
    state: &AppState,
    user: &CurrentUser,
    response: &str,
) -> Result<Html<String>, AppError> {
    let patients = state.assistant.directory().records();
    Ok(Html(state.views.doctor(&user.0, response, patients)?))
}
