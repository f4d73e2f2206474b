use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Category row joined with the live count of its tools
#[derive(Debug, Clone, FromRow)]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tool_count: i64,
}
