//! Role gate for the dashboards
//!
//! Runs before any extractor on the dashboard routes, so an unauthorized
//! request is redirected without its form body ever being read.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::routes::found;
use crate::session::{self, CurrentUser, Role};

/// Let the request through only for a logged-in doctor
pub async fn require_doctor(session: Session, request: Request, next: Next) -> Response {
    gate(Role::Doctor, session, request, next).await
}

/// Let the request through only for a logged-in admin
pub async fn require_admin(session: Session, request: Request, next: Next) -> Response {
    gate(Role::Admin, session, request, next).await
}

async fn gate(required: Role, session: Session, mut request: Request, next: Next) -> Response {
    let state = match session::load(&session).await {
        Ok(state) => state,
        Err(e) => return AppError::from(e).into_response(),
    };

    match state {
        Some(state) if state.role == required => {
            request.extensions_mut().insert(CurrentUser(state));
            next.run(request).await
        }
        // Anonymous or the other role: back to the login page
        _ => found("/"),
    }
}
