//! WHERE clause for the tool listing.
//!
//! The listing and its total count run as two separate statements, so the
//! predicate is built once as a [`ToolFilter`] and pushed onto each
//! `QueryBuilder`. Only columns of `tools t` are referenced, which lets the
//! count query skip the category join.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::features::tools::dtos::ListToolsQuery;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Id(Uuid),
    /// A category id that is not a UUID can never match a row
    Unmatchable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolFilter {
    pub category: CategoryFilter,
    pub search: Option<String>,
    pub featured_only: bool,
}

impl ToolFilter {
    pub fn from_query(query: &ListToolsQuery) -> Self {
        let category = match non_empty(query.category_id.as_deref()) {
            None => CategoryFilter::Any,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => CategoryFilter::Id(id),
                Err(_) => CategoryFilter::Unmatchable,
            },
        };

        Self {
            category,
            search: non_empty(query.search.as_deref()).map(str::to_string),
            featured_only: query.featured.as_deref() == Some("true"),
        }
    }

    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut keyword = " WHERE ";

        match &self.category {
            CategoryFilter::Any => {}
            CategoryFilter::Id(id) => {
                qb.push(keyword).push("t.category_id = ").push_bind(*id);
                keyword = " AND ";
            }
            CategoryFilter::Unmatchable => {
                qb.push(keyword).push("FALSE");
                keyword = " AND ";
            }
        }

        if let Some(search) = &self.search {
            let pattern = like_pattern(search);
            qb.push(keyword)
                .push("(t.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR t.description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR t.detailed_description ILIKE ")
                .push_bind(pattern)
                .push(")");
            keyword = " AND ";
        }

        if self.featured_only {
            qb.push(keyword).push("t.featured = TRUE");
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// `%term%` with LIKE metacharacters escaped so user input matches literally
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
