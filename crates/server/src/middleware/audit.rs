//! Audit logging for form submissions

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::request_id::RequestId;

/// What a POST to `path` represents
fn action_for(path: &str) -> &'static str {
    match path {
        "/" => "login",
        "/doctor" | "/admin" => "query",
        _ => "other",
    }
}

/// Middleware to log logins and queries for audit purposes.
///
/// Only metadata is logged. Usernames and query text never reach the log.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    // Run the request first to get the response status
    let response = next.run(request).await;

    if method == Method::POST {
        let status = response.status().as_u16();

        tracing::info!(
            target: "audit",
            request_id = %request_id,
            action = action_for(&path),
            path = %path,
            status = %status,
            "Form submission"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::action_for;

    #[test]
    fn classifies_form_targets() {
        assert_eq!(action_for("/"), "login");
        assert_eq!(action_for("/doctor"), "query");
        assert_eq!(action_for("/admin"), "query");
        assert_eq!(action_for("/logout"), "other");
    }
}
