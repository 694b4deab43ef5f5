//! emr-server library crate
//!
//! Exposes `build_app` and `config` for integration tests.
//! The actual binary entrypoint is in `main.rs`.

mod ai;
mod assistant;
pub mod config;
mod error;
mod middleware;
mod routes;
mod session;
mod views;

use std::sync::Arc;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use emr_core::PatientDirectory;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer, cookie::SameSite};

use assistant::Assistant;
use config::Config;
use views::Views;

pub use ai::SMART_REPLY_APOLOGY;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "emr_session";

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    assistant: Assistant,
    views: Arc<Views>,
}

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port. Fails only if the embedded templates
/// do not parse.
pub fn build_app(config: &Config) -> Result<Router, tera::Error> {
    // Completion client (None when smart replies are switched off)
    let smart_replies: Option<ai::CompletionClient> = config.smart_replies.then(|| {
        ai::CompletionClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.openai_model.clone(),
            config.completion_timeout,
        )
    });

    let state = AppState {
        assistant: Assistant::new(Arc::new(PatientDirectory::seeded()), smart_replies),
        views: Arc::new(Views::new()?),
    };

    // One bucket shared by both dashboards
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Dashboards: the role gate is the outermost route layer so nothing
    // else runs for a caller without the right role
    let doctor_routes = Router::new()
        .route(
            "/doctor",
            get(routes::dashboard::doctor_page).post(routes::dashboard::doctor_query),
        )
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter.clone()))
        .route_layer(axum_mw::from_fn(middleware::require_doctor));

    let admin_routes = Router::new()
        .route(
            "/admin",
            get(routes::dashboard::admin_page).post(routes::dashboard::admin_query),
        )
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter))
        .route_layer(axum_mw::from_fn(middleware::require_admin));

    // Install Prometheus metrics recorder.
    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic; the second install is
    // silently ignored and we still get a valid handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/", get(routes::login::page).post(routes::login::submit))
        .route("/logout", get(routes::login::logout))
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    // Sessions live in process memory, keyed by a signed cookie
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_signed(config.session_key());

    // Build application
    Ok(Router::new()
        .merge(public_routes)
        .merge(doctor_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(sessions)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware)))
}
