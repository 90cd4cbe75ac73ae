use crate::article_store::ArticleStore;
use crate::common::{
    model::{Article, InteractionEvent, TrendingQuery},
    time::now_utc,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub mod event_store;
pub mod memo;
pub mod ranker;
pub mod scoring;

use event_store::EventStore;
use memo::ResultMemoizer;
use scoring::Origin;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingSettings {
    /// Events older than this are dropped by `sweep`.
    pub event_horizon: chrono::Duration,
    pub cache_ttl: Duration,
}

impl Default for TrendingSettings {
    fn default() -> Self {
        Self {
            event_horizon: chrono::Duration::days(7),
            cache_ttl: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub evicted_events: usize,
    pub purged_results: usize,
}

pub struct TrendingEngine {
    events: EventStore,
    memo: ResultMemoizer,
    articles: Arc<dyn ArticleStore>,
    settings: TrendingSettings,
}

impl TrendingEngine {
    pub fn new(articles: Arc<dyn ArticleStore>, settings: TrendingSettings) -> Self {
        Self {
            events: EventStore::new(),
            memo: ResultMemoizer::new(settings.cache_ttl),
            articles,
            settings,
        }
    }

    /// Stores the event. Cached results are not invalidated; they age out after the TTL.
    pub fn ingest(&self, event: InteractionEvent) {
        debug!(
            article_id = %event.article_id,
            event_type = ?event.event_type,
            "ingesting interaction event"
        );
        self.events.append(event);
    }

    pub async fn top_trending(
        &self,
        latitude: f64,
        longitude: f64,
        limit: usize,
    ) -> Result<Vec<Article>> {
        self.top_trending_at(latitude, longitude, limit, now_utc())
            .await
    }

    /// Same as `top_trending` with an explicit clock. `now` only matters on a cache miss.
    pub async fn top_trending_at(
        &self,
        latitude: f64,
        longitude: f64,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Article>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let query = TrendingQuery::new(latitude, longitude, limit);
        self.memo
            .get_or_compute(query, || self.compute(query, now))
            .await
    }

    async fn compute(&self, query: TrendingQuery, now: DateTime<Utc>) -> Result<Vec<Article>> {
        let snapshot = self.events.snapshot_all();
        let origin = Origin {
            latitude: query.latitude(),
            longitude: query.longitude(),
        };
        let scores = scoring::score_all(&snapshot, origin, now);
        let top_ids = ranker::top_k(&scores, query.limit());
        debug!(
            events = snapshot.len(),
            scored_articles = scores.len(),
            ranked = top_ids.len(),
            "computed trending scores"
        );
        ranker::resolve(self.articles.as_ref(), &top_ids).await
    }

    /// Drops events past the retention horizon and expired cached results. A horizon reaching
    /// before the earliest representable timestamp evicts nothing.
    pub fn sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let evicted_events = match now.checked_sub_signed(self.settings.event_horizon) {
            Some(cutoff) => self.events.evict_older_than(cutoff),
            None => 0,
        };
        let report = SweepReport {
            evicted_events,
            purged_results: self.memo.purge_expired(),
        };
        info!(
            evicted_events = report.evicted_events,
            purged_results = report.purged_results,
            remaining_events = self.events.len(),
            "trending sweep finished"
        );
        report
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
