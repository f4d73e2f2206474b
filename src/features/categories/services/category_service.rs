use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_constraint_error, AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::CategoryWithCount;
use crate::shared::validation::{blank_to_none, validate_required};

/// Category fields after presence validation
struct CategoryInput {
    name: String,
    slug: String,
    description: Option<String>,
}

impl TryFrom<CategoryRequestDto> for CategoryInput {
    type Error = AppError;

    fn try_from(dto: CategoryRequestDto) -> Result<Self> {
        validate_required(&dto)?;
        match (dto.name, dto.slug) {
            (Some(name), Some(slug)) => Ok(Self {
                name,
                slug,
                description: blank_to_none(dto.description),
            }),
            _ => Err(AppError::Validation("Missing required fields".to_string())),
        }
    }
}

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories with their tool counts, ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.slug, c.description, c.created_at, c.updated_at,
                   COUNT(t.id) AS tool_count
            FROM categories c
            LEFT JOIN tools t ON t.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.slug, c.description, c.created_at, c.updated_at,
                   COUNT(t.id) AS tool_count
            FROM categories c
            LEFT JOIN tools t ON t.category_id = c.id
            WHERE c.id = $1
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by id: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let input = CategoryInput::try_from(dto)?;

        let category = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            INSERT INTO categories (name, slug, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, description, created_at, updated_at, 0::BIGINT AS tool_count
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Category slug"))?;

        tracing::info!("Created category '{}' ({})", category.slug, category.id);

        Ok(category.into())
    }

    /// Replace a category's editable fields
    pub async fn update(&self, id: Uuid, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let input = CategoryInput::try_from(dto)?;

        let category = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            WITH updated AS (
                UPDATE categories
                SET name = $1,
                    slug = $2,
                    description = $3,
                    updated_at = NOW()
                WHERE id = $4
                RETURNING id, name, slug, description, created_at, updated_at
            )
            SELECT u.id, u.name, u.slug, u.description, u.created_at, u.updated_at,
                   (SELECT COUNT(*) FROM tools t WHERE t.category_id = u.id) AS tool_count
            FROM updated u
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Category slug"))?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        Ok(category.into())
    }

    /// Delete a category. Its tools go with it through the foreign key cascade.
    ///
    /// Returns the number of tools removed along with the category.
    pub async fn delete(&self, id: Uuid) -> Result<i64> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let tool_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tools WHERE category_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Deleted category {} and {} tools", id, tool_count);

        Ok(tool_count)
    }
}
