use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{map_constraint_error, AppError, Result};
use crate::features::tools::dtos::{
    ListToolsQuery, ToolListResponseDto, ToolRequestDto, ToolResponseDto,
};
use crate::features::tools::filter::ToolFilter;
use crate::features::tools::models::ToolWithCategory;
use crate::shared::types::PaginationMeta;
use crate::shared::validation::{blank_to_none, validate_required};

/// Columns of `tools t` joined with `categories c`, aliased to match [`ToolWithCategory`]
const TOOL_COLUMNS: &str = r#"
    t.id, t.name, t.url, t.description, t.detailed_description, t.icon, t.featured,
    t.category_id, t.created_at, t.updated_at,
    c.name AS category_name, c.slug AS category_slug, c.description AS category_description,
    c.created_at AS category_created_at, c.updated_at AS category_updated_at
"#;

/// Tool fields after presence validation
#[derive(Debug)]
struct ToolInput {
    name: String,
    url: String,
    description: String,
    detailed_description: Option<String>,
    icon: Option<String>,
    featured: bool,
    category_id: Uuid,
}

impl TryFrom<ToolRequestDto> for ToolInput {
    type Error = AppError;

    fn try_from(dto: ToolRequestDto) -> Result<Self> {
        validate_required(&dto)?;
        let (Some(name), Some(url), Some(description), Some(category_id)) =
            (dto.name, dto.url, dto.description, dto.category_id)
        else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        let category_id = Uuid::parse_str(&category_id)
            .map_err(|_| AppError::Validation("Invalid categoryId".to_string()))?;

        Ok(Self {
            name,
            url,
            description,
            detailed_description: blank_to_none(dto.detailed_description),
            icon: blank_to_none(dto.icon),
            featured: dto.featured.unwrap_or(false),
            category_id,
        })
    }
}

/// Service for tool operations
pub struct ToolService {
    pool: PgPool,
}

impl ToolService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered, paginated listing, newest first.
    ///
    /// The page and the total count are fetched concurrently with the same
    /// predicate.
    pub async fn list(&self, query: &ListToolsQuery) -> Result<ToolListResponseDto> {
        let filter = ToolFilter::from_query(query);
        let page = query.page_request();

        let mut list_qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {TOOL_COLUMNS} FROM tools t JOIN categories c ON c.id = t.category_id"
        ));
        filter.push_where(&mut list_qb);
        list_qb
            .push(" ORDER BY t.created_at DESC, t.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM tools t");
        filter.push_where(&mut count_qb);

        let (tools, total) = tokio::try_join!(
            list_qb
                .build_query_as::<ToolWithCategory>()
                .fetch_all(&self.pool),
            count_qb.build_query_scalar::<i64>().fetch_one(&self.pool),
        )
        .map_err(|e| {
            tracing::error!("Failed to list tools: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(ToolListResponseDto {
            tools: tools.into_iter().map(|t| t.into()).collect(),
            pagination: PaginationMeta::new(total, page),
        })
    }

    /// Get tool by id, with its category
    pub async fn get_by_id(&self, id: Uuid) -> Result<ToolResponseDto> {
        let tool = sqlx::query_as::<_, ToolWithCategory>(&format!(
            "SELECT {TOOL_COLUMNS} FROM tools t JOIN categories c ON c.id = t.category_id WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get tool by id: {:?}", e);
            AppError::Database(e)
        })?;

        tool.map(|t| t.into())
            .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))
    }

    pub async fn create(&self, dto: ToolRequestDto) -> Result<ToolResponseDto> {
        let input = ToolInput::try_from(dto)?;

        let tool = sqlx::query_as::<_, ToolWithCategory>(&format!(
            r#"
            WITH t AS (
                INSERT INTO tools (name, url, description, detailed_description, icon, featured, category_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {TOOL_COLUMNS} FROM t JOIN categories c ON c.id = t.category_id
            "#
        ))
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.description)
        .bind(&input.detailed_description)
        .bind(&input.icon)
        .bind(input.featured)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Tool"))?;

        tracing::info!("Created tool '{}' ({})", tool.name, tool.id);

        Ok(tool.into())
    }

    /// Replace every editable field of a tool
    pub async fn update(&self, id: Uuid, dto: ToolRequestDto) -> Result<ToolResponseDto> {
        let input = ToolInput::try_from(dto)?;

        let tool = sqlx::query_as::<_, ToolWithCategory>(&format!(
            r#"
            WITH t AS (
                UPDATE tools
                SET name = $1,
                    url = $2,
                    description = $3,
                    detailed_description = $4,
                    icon = $5,
                    featured = $6,
                    category_id = $7,
                    updated_at = NOW()
                WHERE id = $8
                RETURNING *
            )
            SELECT {TOOL_COLUMNS} FROM t JOIN categories c ON c.id = t.category_id
            "#
        ))
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.description)
        .bind(&input.detailed_description)
        .bind(&input.icon)
        .bind(input.featured)
        .bind(input.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Tool"))?
        .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))?;

        Ok(tool.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tool {} not found", id)));
        }

        tracing::info!("Deleted tool {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, url: &str, category_id: Uuid) -> ToolRequestDto {
        ToolRequestDto {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            description: Some(format!("{name} description")),
            category_id: Some(category_id.to_string()),
            detailed_description: None,
            icon: None,
            featured: None,
        }
    }

    async fn insert_category(pool: &PgPool, name: &str, slug: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn list_query(pairs: &[(&str, &str)]) -> ListToolsQuery {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_input_defaults_and_blanks() {
        let mut dto = request("GitHub", "https://github.com", Uuid::new_v4());
        dto.icon = Some(String::new());
        dto.detailed_description = Some("Hosting for git repositories".to_string());

        let input = ToolInput::try_from(dto).unwrap();
        assert!(!input.featured);
        assert_eq!(input.icon, None);
        assert_eq!(
            input.detailed_description.as_deref(),
            Some("Hosting for git repositories")
        );
    }

    #[test]
    fn test_input_reports_every_missing_field() {
        let dto = ToolRequestDto {
            name: Some("GitHub".to_string()),
            url: None,
            description: Some(String::new()),
            category_id: None,
            detailed_description: None,
            icon: None,
            featured: Some(true),
        };
        match ToolInput::try_from(dto) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Missing required fields: categoryId, description, url")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_input_rejects_malformed_category_id() {
        let mut dto = request("GitHub", "https://github.com", Uuid::new_v4());
        dto.category_id = Some("development".to_string());
        match ToolInput::try_from(dto) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid categoryId"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_browse_scenario(pool: PgPool) {
        let service = ToolService::new(pool.clone());
        let development = insert_category(&pool, "Development", "development").await;
        let productivity = insert_category(&pool, "Productivity", "productivity").await;

        let mut github = request("GitHub", "https://github.com", development);
        github.featured = Some(true);
        github.description = Some("Where the world builds software".to_string());
        service.create(github).await.unwrap();

        let mut notion = request("Notion", "https://www.notion.so", productivity);
        notion.detailed_description = Some("Docs, wikis and projects; integrates with GitHub".to_string());
        service.create(notion).await.unwrap();

        let dev_id = development.to_string();
        let by_category = service
            .list(&list_query(&[("categoryId", dev_id.as_str())]))
            .await
            .unwrap();
        assert_eq!(by_category.pagination.total, 1);
        assert_eq!(by_category.tools[0].name, "GitHub");
        assert_eq!(by_category.tools[0].category.slug, "development");

        let notion_only = service.list(&list_query(&[("search", "notion")])).await.unwrap();
        assert_eq!(notion_only.tools.len(), 1);
        assert_eq!(notion_only.tools[0].name, "Notion");

        let search = service.list(&list_query(&[("search", "github")])).await.unwrap();
        let mut names: Vec<_> = search.tools.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["GitHub", "Notion"]);

        let featured = service.list(&list_query(&[("featured", "true")])).await.unwrap();
        assert_eq!(featured.tools.len(), 1);
        assert!(featured.tools.iter().all(|t| t.featured));

        let paged = service
            .list(&list_query(&[("limit", "1"), ("page", "2")]))
            .await
            .unwrap();
        assert_eq!(paged.tools.len(), 1);
        assert_eq!(paged.pagination.total, 2);
        assert_eq!(paged.pagination.total_pages, 2);
        assert_eq!(paged.pagination.page, 2);

        let unmatchable = service
            .list(&list_query(&[("categoryId", "not-a-uuid")]))
            .await
            .unwrap();
        assert!(unmatchable.tools.is_empty());
        assert_eq!(unmatchable.pagination.total, 0);
        assert_eq!(unmatchable.pagination.total_pages, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_update_and_delete(pool: PgPool) {
        let service = ToolService::new(pool.clone());
        let design = insert_category(&pool, "Design", "design").await;
        let ai = insert_category(&pool, "AI", "ai").await;

        let created = service
            .create(request("Figma", "https://www.figma.com", design))
            .await
            .unwrap();
        assert!(!created.featured);

        let mut replacement = request("Figma", "https://figma.com", ai);
        replacement.featured = Some(true);
        let updated = service.update(created.id, replacement).await.unwrap();
        assert_eq!(updated.url, "https://figma.com");
        assert_eq!(updated.category.id, ai);
        assert!(updated.featured);
        assert!(updated.updated_at >= created.updated_at);

        let dangling = service
            .update(created.id, request("Figma", "https://figma.com", Uuid::new_v4()))
            .await;
        assert!(matches!(dangling, Err(AppError::Validation(_))));

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
