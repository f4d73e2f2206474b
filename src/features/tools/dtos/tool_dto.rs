use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::tools::models::ToolWithCategory;
use crate::shared::types::{PageRequest, PaginationMeta};

/// Query params for listing tools.
///
/// Everything arrives as raw text: numeric values that fail to parse fall
/// back to their defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListToolsQuery {
    /// Only tools in this category
    pub category_id: Option<String>,
    /// Case-insensitive substring match on name, description and detailed description
    pub search: Option<String>,
    /// `true` to return featured tools only
    pub featured: Option<String>,
    /// Page number (1-indexed, default: 1)
    pub page: Option<String>,
    /// Items per page (default: 12, max: 100)
    pub limit: Option<String>,
}

impl ListToolsQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Category summary embedded in tool responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response DTO for tool
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponseDto {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub icon: Option<String>,
    pub featured: bool,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: ToolCategoryDto,
}

impl From<ToolWithCategory> for ToolResponseDto {
    fn from(t: ToolWithCategory) -> Self {
        Self {
            id: t.id,
            name: t.name,
            url: t.url,
            description: t.description,
            detailed_description: t.detailed_description,
            icon: t.icon,
            featured: t.featured,
            category_id: t.category_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
            category: ToolCategoryDto {
                id: t.category_id,
                name: t.category_name,
                slug: t.category_slug,
                description: t.category_description,
                created_at: t.category_created_at,
                updated_at: t.category_updated_at,
            },
        }
    }
}

/// Response DTO for the tool listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolListResponseDto {
    pub tools: Vec<ToolResponseDto>,
    pub pagination: PaginationMeta,
}

/// Request DTO for creating or replacing a tool
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequestDto {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub url: Option<String>,

    /// Short description shown on cards
    #[validate(required, length(min = 1))]
    pub description: Option<String>,

    #[validate(required, length(min = 1))]
    pub category_id: Option<String>,

    pub detailed_description: Option<String>,

    pub icon: Option<String>,

    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_admin_form_payload() {
        let dto: ToolRequestDto = serde_json::from_value(serde_json::json!({
            "name": "GitHub",
            "url": "https://github.com",
            "description": "Code hosting",
            "detailedDescription": "",
            "icon": "",
            "categoryId": "5f0c6a3e-8a53-4b89-9a3c-0e8f2f3b8d11",
            "featured": true
        }))
        .unwrap();

        assert_eq!(dto.name.as_deref(), Some("GitHub"));
        assert_eq!(dto.detailed_description.as_deref(), Some(""));
        assert_eq!(dto.featured, Some(true));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_request_without_category_fails_validation() {
        let dto: ToolRequestDto = serde_json::from_value(serde_json::json!({
            "name": "GitHub",
            "url": "https://github.com",
            "description": "Code hosting"
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category_id"));
    }

    #[test]
    fn test_list_query_uses_camel_case_keys() {
        let query: ListToolsQuery = serde_json::from_value(serde_json::json!({
            "categoryId": "abc",
            "page": "2",
            "limit": "5"
        }))
        .unwrap();

        assert_eq!(query.category_id.as_deref(), Some("abc"));
        let page = query.page_request();
        assert_eq!((page.page, page.limit, page.offset()), (2, 5, 5));
    }
}
