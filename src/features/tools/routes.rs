use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tools::handlers;
use crate::features::tools::services::ToolService;

/// Create routes for the tools feature
pub fn routes(service: Arc<ToolService>) -> Router {
    Router::new()
        .route(
            "/api/tools",
            get(handlers::list_tools).post(handlers::create_tool),
        )
        .route(
            "/api/tools/{id}",
            get(handlers::get_tool)
                .put(handlers::update_tool)
                .delete(handlers::delete_tool),
        )
        .with_state(service)
}
