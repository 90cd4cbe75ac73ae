use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};

pub trait Score {
    fn score(&self) -> f64;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    View,
    Click,
    #[default]
    #[serde(other)]
    Other,
}

impl EventType {
    pub fn base_weight(&self) -> f64 {
        match self {
            EventType::Click => 2.0,
            EventType::View => 1.0,
            EventType::Other => 0.5,
        }
    }
}

/// One user interaction with one article. Immutable once stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    pub user_id: Option<String>,
    pub article_id: String,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// Memoization key for a trending request. Coordinates are compared bit for bit, so only
/// floating-point-identical queries share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrendingQuery {
    latitude_bits: u64,
    longitude_bits: u64,
    limit: usize,
}

impl TrendingQuery {
    pub fn new(latitude: f64, longitude: f64, limit: usize) -> Self {
        TrendingQuery {
            latitude_bits: latitude.to_bits(),
            longitude_bits: longitude.to_bits(),
            limit,
        }
    }

    pub fn latitude(&self) -> f64 {
        f64::from_bits(self.latitude_bits)
    }

    pub fn longitude(&self) -> f64 {
        f64::from_bits(self.longitude_bits)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredArticle {
    pub article_id: String,
    pub score: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub publication_date: Option<NaiveDateTime>,
    pub source_name: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub relevance_score: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub llm_summary: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for Article {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let category: Option<String> = row.try_get("category")?;
        let category = match category {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "category".to_string(),
                    source: Box::new(e),
                })?
            }
            _ => Vec::new(),
        };

        Ok(Article {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            url: row.try_get("url")?,
            publication_date: row.try_get("publication_date")?,
            source_name: row.try_get("source_name")?,
            category,
            relevance_score: row.try_get("relevance_score")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            llm_summary: row.try_get("llm_summary")?,
        })
    }
}
