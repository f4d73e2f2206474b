use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::model::AuthenticatedAdmin;
use crate::features::tools::dtos::{
    ListToolsQuery, ToolListResponseDto, ToolRequestDto, ToolResponseDto,
};
use crate::features::tools::services::ToolService;
use crate::shared::types::ErrorResponse;

/// List tools
///
/// Newest first. Filters combine with AND; malformed `page`/`limit` values
/// fall back to their defaults.
#[utoipa::path(
    get,
    path = "/api/tools",
    params(ListToolsQuery),
    responses(
        (status = 200, description = "Page of tools", body = ToolListResponseDto),
    ),
    tag = "tools"
)]
pub async fn list_tools(
    State(service): State<Arc<ToolService>>,
    AppQuery(query): AppQuery<ListToolsQuery>,
) -> Result<Json<ToolListResponseDto>> {
    Ok(Json(service.list(&query).await?))
}

/// Create a tool (admin only)
#[utoipa::path(
    post,
    path = "/api/tools",
    request_body = ToolRequestDto,
    responses(
        (status = 201, description = "Tool created", body = ToolResponseDto),
        (status = 400, description = "Missing fields or unknown category", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "tools",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn create_tool(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<ToolService>>,
    AppJson(dto): AppJson<ToolRequestDto>,
) -> Result<(StatusCode, Json<ToolResponseDto>)> {
    let tool = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

/// Get tool by id
#[utoipa::path(
    get,
    path = "/api/tools/{id}",
    params(
        ("id" = Uuid, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool found", body = ToolResponseDto),
        (status = 404, description = "Tool not found", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn get_tool(
    State(service): State<Arc<ToolService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ToolResponseDto>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Replace a tool (admin only)
#[utoipa::path(
    put,
    path = "/api/tools/{id}",
    params(
        ("id" = Uuid, Path, description = "Tool ID")
    ),
    request_body = ToolRequestDto,
    responses(
        (status = 200, description = "Tool updated", body = ToolResponseDto),
        (status = 400, description = "Missing fields or unknown category", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Tool not found", body = ErrorResponse)
    ),
    tag = "tools",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn update_tool(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<ToolService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<ToolRequestDto>,
) -> Result<Json<ToolResponseDto>> {
    Ok(Json(service.update(id, dto).await?))
}

/// Delete a tool (admin only)
#[utoipa::path(
    delete,
    path = "/api/tools/{id}",
    params(
        ("id" = Uuid, Path, description = "Tool ID")
    ),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Tool not found", body = ErrorResponse)
    ),
    tag = "tools",
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn delete_tool(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<ToolService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
