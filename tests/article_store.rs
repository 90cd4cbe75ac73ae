use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use trending_service::{
    algs::trending::{TrendingEngine, TrendingSettings},
    article_store::{ArticleStore, SqliteArticleStore},
    common::model::{Article, EventType, InteractionEvent},
    database::setup_database,
};

fn article(id: &str, category: &[&str]) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Story {id}"),
        description: Some(format!("Details about {id}")),
        url: Some(format!("https://news.example/{id}")),
        publication_date: NaiveDate::from_ymd_opt(2024, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0)),
        source_name: Some("Daily Example".to_string()),
        category: category.iter().map(|c| c.to_string()).collect(),
        relevance_score: 0.72,
        latitude: Some(40.71),
        longitude: Some(-74.0),
        llm_summary: None,
    }
}

async fn seeded_store() -> SqliteArticleStore {
    let pool = setup_database("sqlite::memory:")
        .await
        .expect("in-memory database");
    let store = SqliteArticleStore::new(pool);
    store
        .insert_articles(&[
            article("a1", &["business"]),
            article("a2", &["sports", "local"]),
            article("a3", &[]),
        ])
        .await
        .expect("seed articles");
    store
}

#[tokio::test]
async fn find_by_ids_returns_known_articles_only() {
    let store = seeded_store().await;

    let found = store
        .find_by_ids(&["a2".to_string(), "missing".to_string(), "a1".to_string()])
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found["a1"], article("a1", &["business"]));
    assert_eq!(found["a2"].category, vec!["sports", "local"]);
    assert!(!found.contains_key("missing"));
}

#[tokio::test]
async fn empty_category_round_trips_as_empty_list() {
    let store = seeded_store().await;
    let found = store.find_by_ids(&["a3".to_string()]).await.unwrap();
    assert!(found["a3"].category.is_empty());
}

#[tokio::test]
async fn no_ids_means_no_results() {
    let store = seeded_store().await;
    assert!(store.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn trending_resolves_through_sqlite() {
    let store = Arc::new(seeded_store().await);
    let engine = TrendingEngine::new(store, TrendingSettings::default());
    let now = Utc::now();

    for (id, event_type) in [
        ("a3", EventType::Click),
        ("a3", EventType::Click),
        ("a1", EventType::Click),
        ("gone", EventType::Click),
        ("gone", EventType::Click),
        ("gone", EventType::Click),
    ] {
        engine.ingest(InteractionEvent {
            user_id: None,
            article_id: id.to_string(),
            event_type,
            latitude: 40.7,
            longitude: -74.0,
            timestamp: now,
        });
    }

    let top = engine.top_trending_at(40.7, -74.0, 5, now).await.unwrap();
    let ids: Vec<&str> = top.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a3", "a1"]);
}

#[tokio::test]
async fn lookups_larger_than_one_statement_are_split() {
    let pool = setup_database("sqlite::memory:")
        .await
        .expect("in-memory database");
    let store = SqliteArticleStore::new(pool);
    let known: Vec<Article> = (0..40_000)
        .step_by(40)
        .map(|i| article(&format!("a{i}"), &["bulk"]))
        .collect();
    store.insert_articles(&known).await.expect("seed articles");

    // more ids than SQLite accepts as bound parameters in one statement
    let ids: Vec<String> = (0..40_000).map(|i| format!("a{i}")).collect();
    let found = store.find_by_ids(&ids).await.unwrap();

    assert_eq!(found.len(), 1_000);
    assert!(found.contains_key("a0"));
    assert!(found.contains_key("a39960"));
    assert!(!found.contains_key("a1"));
}
