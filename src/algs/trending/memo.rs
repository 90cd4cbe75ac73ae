use crate::common::model::{Article, TrendingQuery};
use anyhow::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

struct CachedResult {
    articles: Vec<Article>,
    stored_at: Instant,
}

/// Caches ranked results per query key for `ttl`.
///
/// The lock is never held across `compute`, so misses for different keys run in parallel.
/// Concurrent misses for the same key each compute and the last one to finish is kept.
pub struct ResultMemoizer {
    entries: RwLock<HashMap<TrendingQuery, CachedResult>>,
    ttl: Duration,
}

impl ResultMemoizer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, query: &TrendingQuery) -> Option<Vec<Article>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(query)
            .filter(|cached| cached.stored_at.elapsed() < self.ttl)
            .map(|cached| cached.articles.clone())
    }

    pub fn insert(&self, query: TrendingQuery, articles: Vec<Article>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                query,
                CachedResult {
                    articles,
                    stored_at: Instant::now(),
                },
            );
    }

    /// Failed computations are not cached.
    pub async fn get_or_compute<F, Fut>(
        &self,
        query: TrendingQuery,
        compute: F,
    ) -> Result<Vec<Article>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Article>>>,
    {
        if let Some(hit) = self.get(&query) {
            debug!(?query, "trending cache hit");
            return Ok(hit);
        }

        debug!(?query, "trending cache miss");
        let articles = compute().await?;
        self.insert(query, articles.clone());
        Ok(articles)
    }

    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, cached| cached.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
