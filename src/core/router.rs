use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;

use crate::core::middleware;
use crate::features::auth::{routes as auth_routes, AuthService, SessionManager};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::tools::{routes as tools_routes, ToolService};

/// Shared services behind the API routes
pub struct AppServices {
    pub sessions: Arc<SessionManager>,
    pub auth: Arc<AuthService>,
    pub categories: Arc<CategoryService>,
    pub tools: Arc<ToolService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(pool: PgPool, sessions: Arc<SessionManager>) -> Self {
        let auth = Arc::new(AuthService::new(pool.clone(), Arc::clone(&sessions)));
        tracing::info!("Auth service initialized");

        let categories = Arc::new(CategoryService::new(pool.clone()));
        tracing::info!("Category service initialized");

        let tools = Arc::new(ToolService::new(pool.clone()));
        tracing::info!("Tool service initialized");

        let dashboard = Arc::new(DashboardService::new(pool));
        tracing::info!("Dashboard service initialized");

        Self {
            sessions,
            auth,
            categories,
            tools,
            dashboard,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All JSON API routes plus `/health`.
///
/// Every route sees the session middleware; handlers that mutate require
/// `AuthenticatedAdmin` themselves.
pub fn api_routes(services: AppServices, max_body_size: usize) -> Router {
    Router::new()
        .merge(auth_routes(services.auth))
        .merge(categories_routes(services.categories))
        .merge(tools_routes(services.tools))
        .merge(dashboard_routes(services.dashboard))
        .layer(axum::middleware::from_fn_with_state(
            services.sessions,
            middleware::session_middleware,
        ))
        .layer(DefaultBodyLimit::max(max_body_size))
        .route("/health", get(health_check))
}
