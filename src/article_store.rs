use crate::common::model::Article;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{query, QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Batch lookup of articles by id. The result is unordered and omits unknown ids.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Article>>;
}

// well below SQLite's bound-parameter limit
const MAX_IDS_PER_QUERY: usize = 900;

pub struct SqliteArticleStore {
    pool: SqlitePool,
}

impl SqliteArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert_articles(&self, articles: &[Article]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for article in articles {
            let category = serde_json::to_string(&article.category)?;
            query(
                "
                insert or replace into article (
                      id
                    , title
                    , description
                    , url
                    , publication_date
                    , source_name
                    , category
                    , relevance_score
                    , latitude
                    , longitude
                    , llm_summary
                ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(&article.id)
            .bind(&article.title)
            .bind(&article.description)
            .bind(&article.url)
            .bind(article.publication_date)
            .bind(&article.source_name)
            .bind(category)
            .bind(article.relevance_score)
            .bind(article.latitude)
            .bind(article.longitude)
            .bind(&article.llm_summary)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("inserting article {}", article.id))?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn find_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Article>> {
        let mut found = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "
                select
                      id
                    , title
                    , description
                    , url
                    , publication_date
                    , source_name
                    , category
                    , relevance_score
                    , latitude
                    , longitude
                    , llm_summary
                from article
                where id in (",
            );
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(id.clone());
            }
            separated.push_unseparated(")");

            let articles: Vec<Article> = builder
                .build_query_as::<Article>()
                .fetch_all(&self.pool)
                .await
                .context("looking up articles by id")?;

            found.extend(articles.into_iter().map(|a| (a.id.clone(), a)));
        }

        Ok(found)
    }
}

/// Article store held entirely in memory. Backs tests and local runs without a database.
#[derive(Default)]
pub struct InMemoryArticleStore {
    articles: RwLock<HashMap<String, Article>>,
}

impl InMemoryArticleStore {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles.into_iter().map(|a| (a.id.clone(), a)).collect()),
        }
    }

    pub fn remove(&self, id: &str) -> Option<Article> {
        self.articles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn find_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Article>> {
        let articles = self.articles.read().unwrap_or_else(PoisonError::into_inner);
        Ok(ids
            .iter()
            .filter_map(|id| articles.get(id).map(|a| (id.clone(), a.clone())))
            .collect())
    }
}
