use crate::article_store::ArticleStore;
use crate::common::model::{Article, ScoredArticle};
use anyhow::Result;
use itertools::Itertools;
use std::collections::HashMap;

/// Orders the score map by score descending. Equal scores fall back to the article id in
/// ascending byte order, so the ranking never depends on map iteration order.
pub fn rank(scores: &HashMap<String, f64>) -> Vec<ScoredArticle> {
    scores
        .iter()
        .sorted_by(|(id_a, score_a), (id_b, score_b)| {
            score_b.total_cmp(score_a).then_with(|| id_a.cmp(id_b))
        })
        .map(|(article_id, score)| ScoredArticle {
            article_id: article_id.clone(),
            score: *score,
        })
        .collect()
}

pub fn top_k(scores: &HashMap<String, f64>, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }
    rank(scores)
        .into_iter()
        .take(limit)
        .map(|scored| scored.article_id)
        .collect()
}

/// Looks up the ranked ids in one batch and reassembles them in rank order. Ids the store
/// does not know about are dropped; a failing store is propagated.
pub async fn resolve(store: &dyn ArticleStore, ordered_ids: &[String]) -> Result<Vec<Article>> {
    if ordered_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id = store.find_by_ids(ordered_ids).await?;

    Ok(ordered_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect())
}
