use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{self, session::SESSION_COOKIE};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::tools::{dtos as tools_dtos, handlers as tools_handlers};
use crate::shared::types::{ErrorResponse, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_session,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Tools
        tools_handlers::list_tools,
        tools_handlers::create_tool,
        tools_handlers::get_tool,
        tools_handlers::update_tool,
        tools_handlers::delete_tool,
        // Dashboard (admin)
        dashboard_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            PaginationMeta,
            // Auth
            auth::model::AuthenticatedAdmin,
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            auth::dtos::AdminProfileDto,
            auth::dtos::SessionResponseDto,
            // Categories
            categories_dtos::CategoryCountDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryRequestDto,
            // Tools
            tools_dtos::ToolCategoryDto,
            tools_dtos::ToolResponseDto,
            tools_dtos::ToolRequestDto,
            tools_dtos::ToolListResponseDto,
            // Dashboard
            dashboard_dtos::StatsDto,
        )
    ),
    tags(
        (name = "auth", description = "Admin login and session"),
        (name = "categories", description = "Tool categories (writes require an admin session)"),
        (name = "tools", description = "Tool catalog with search and filters (writes require an admin session)"),
        (name = "dashboard", description = "Admin dashboard statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Toolnav API",
        version = "0.1.0",
        description = "API documentation for the Toolnav tool directory",
    )
)]
pub struct ApiDoc;

/// Registers the session cookie (and its Bearer fallback) as security schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
