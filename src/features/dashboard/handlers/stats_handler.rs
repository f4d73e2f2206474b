use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::dashboard::dtos::StatsDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ErrorResponse;

/// Catalog totals for the admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard stats", body = StatsDto),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<StatsDto>> {
    Ok(Json(service.get_stats().await?))
}
