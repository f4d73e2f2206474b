use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::StatsDto;

/// Service for admin dashboard statistics
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All three totals in a single round trip
    pub async fn get_stats(&self) -> Result<StatsDto> {
        sqlx::query_as::<_, StatsDto>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM tools) AS total_tools,
                (SELECT COUNT(*) FROM categories) AS total_categories,
                (SELECT COUNT(*) FROM tools WHERE featured) AS featured_tools
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard stats: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_stats_count_rows(pool: PgPool) {
        let service = DashboardService::new(pool.clone());
        assert_eq!(
            service.get_stats().await.unwrap(),
            StatsDto {
                total_tools: 0,
                total_categories: 0,
                featured_tools: 0
            }
        );

        let category: uuid::Uuid =
            sqlx::query_scalar("INSERT INTO categories (name, slug) VALUES ('AI', 'ai') RETURNING id")
                .fetch_one(&pool)
                .await
                .unwrap();
        for (name, featured) in [("ChatGPT", true), ("Claude", false)] {
            sqlx::query(
                "INSERT INTO tools (name, url, description, featured, category_id) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(name)
            .bind(format!("https://{}.test", name.to_lowercase()))
            .bind("assistant")
            .bind(featured)
            .bind(category)
            .execute(&pool)
            .await
            .unwrap();
        }

        let stats = service.get_stats().await.unwrap();
        assert_eq!(stats.total_tools, 2);
        assert_eq!(stats.total_categories, 1);
        assert_eq!(stats.featured_tools, 1);
    }
}
