//! Idempotent sample data for a fresh install.
//!
//! Creates the admin account, four categories and five tools. Rows that are
//! already present (matched by username, slug and tool URL) are left as they
//! are, so running the seed twice is harmless.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::config::SeedConfig;
use crate::features::auth::password;
use crate::shared::constants::ROLE_ADMIN;

struct SeedCategory {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct SeedTool {
    name: &'static str,
    url: &'static str,
    description: &'static str,
    category_slug: &'static str,
    featured: bool,
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Development",
        slug: "development",
        description: "Programming and software development tools",
    },
    SeedCategory {
        name: "Design",
        slug: "design",
        description: "UI/UX and graphic design tools",
    },
    SeedCategory {
        name: "Productivity",
        slug: "productivity",
        description: "Tools that help you get more done",
    },
    SeedCategory {
        name: "AI",
        slug: "ai",
        description: "Artificial intelligence tools",
    },
];

const TOOLS: &[SeedTool] = &[
    SeedTool {
        name: "GitHub",
        url: "https://github.com",
        description: "The largest code hosting platform, with version control and collaborative development",
        category_slug: "development",
        featured: true,
    },
    SeedTool {
        name: "VS Code",
        url: "https://code.visualstudio.com",
        description: "Free, open source code editor from Microsoft with a rich extension ecosystem",
        category_slug: "development",
        featured: true,
    },
    SeedTool {
        name: "Figma",
        url: "https://www.figma.com",
        description: "Browser-based collaborative UI design tool",
        category_slug: "design",
        featured: true,
    },
    SeedTool {
        name: "Notion",
        url: "https://www.notion.so",
        description: "Notes, knowledge base and task management in one collaborative workspace",
        category_slug: "productivity",
        featured: false,
    },
    SeedTool {
        name: "ChatGPT",
        url: "https://chat.openai.com",
        description: "Conversational AI assistant by OpenAI",
        category_slug: "ai",
        featured: true,
    },
];

/// What a seed run actually inserted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub categories_created: usize,
    pub tools_created: usize,
}

pub async fn run(pool: &PgPool, config: &SeedConfig) -> Result<SeedReport> {
    let password = config.admin_password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .context("Password hashing task failed")?
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?;

    let mut tx = pool.begin().await.context("Failed to start seed transaction")?;
    let mut report = SeedReport::default();

    report.admin_created = sqlx::query(
        r#"
        INSERT INTO admin_users (username, password_hash, email, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(&config.admin_username)
    .bind(&password_hash)
    .bind(&config.admin_email)
    .bind(ROLE_ADMIN)
    .execute(&mut *tx)
    .await
    .context("Failed to seed admin user")?
    .rows_affected()
        > 0;

    for category in CATEGORIES {
        let inserted = sqlx::query(
            r#"
            INSERT INTO categories (name, slug, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(category.name)
        .bind(category.slug)
        .bind(category.description)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to seed category '{}'", category.slug))?
        .rows_affected();
        report.categories_created += inserted as usize;
    }

    for tool in TOOLS {
        let category_id = category_id(&mut tx, tool.category_slug).await?;
        let inserted = sqlx::query(
            r#"
            INSERT INTO tools (name, url, description, featured, category_id)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (SELECT 1 FROM tools WHERE url = $2)
            "#,
        )
        .bind(tool.name)
        .bind(tool.url)
        .bind(tool.description)
        .bind(tool.featured)
        .bind(category_id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to seed tool '{}'", tool.name))?
        .rows_affected();
        report.tools_created += inserted as usize;
    }

    tx.commit().await.context("Failed to commit seed transaction")?;

    if report.admin_created {
        tracing::info!("Created admin account '{}'", config.admin_username);
    } else {
        tracing::info!("Admin account '{}' already exists", config.admin_username);
    }
    tracing::info!(
        "Seeded {} categories and {} tools",
        report.categories_created,
        report.tools_created
    );

    Ok(report)
}

async fn category_id(tx: &mut Transaction<'_, Postgres>, slug: &str) -> Result<Uuid> {
    sqlx::query_scalar("SELECT id FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_one(&mut **tx)
        .await
        .with_context(|| format!("Seed category '{}' is missing", slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tool_belongs_to_a_seeded_category() {
        let slugs: HashSet<_> = CATEGORIES.iter().map(|c| c.slug).collect();
        for tool in TOOLS {
            assert!(slugs.contains(tool.category_slug), "{}", tool.name);
        }
    }

    #[test]
    fn test_seed_keys_are_unique() {
        let slugs: HashSet<_> = CATEGORIES.iter().map(|c| c.slug).collect();
        let urls: HashSet<_> = TOOLS.iter().map(|t| t.url).collect();
        assert_eq!(slugs.len(), CATEGORIES.len());
        assert_eq!(urls.len(), TOOLS.len());
    }

    fn config() -> SeedConfig {
        SeedConfig {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            admin_email: "admin@example.com".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_seed_is_idempotent(pool: PgPool) {
        let first = run(&pool, &config()).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                admin_created: true,
                categories_created: 4,
                tools_created: 5
            }
        );

        let second = run(&pool, &config()).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let dev_tools: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tools t JOIN categories c ON c.id = t.category_id WHERE c.slug = 'development'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(dev_tools, 2);

        let hash: String =
            sqlx::query_scalar("SELECT password_hash FROM admin_users WHERE username = 'admin'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(password::verify_password("admin123", &hash).unwrap());
    }
}
