use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Catalog totals shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_tools: i64,
    pub total_categories: i64,
    pub featured_tools: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let stats = StatsDto {
            total_tools: 5,
            total_categories: 4,
            featured_tools: 2,
        };
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            serde_json::json!({"totalTools": 5, "totalCategories": 4, "featuredTools": 2})
        );
    }
}
