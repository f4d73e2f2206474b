use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Tool row joined with its owning category
#[derive(Debug, Clone, FromRow)]
pub struct ToolWithCategory {
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
    pub category_name: String,
    pub category_slug: String,
    pub category_description: Option<String>,
    pub category_created_at: DateTime<Utc>,
    pub category_updated_at: DateTime<Utc>,
}
