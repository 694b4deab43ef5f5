pub mod dashboard;
pub mod health;
pub mod login;
pub mod metrics;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// 302 redirect to `location`
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
