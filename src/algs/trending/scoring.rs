use crate::common::{
    geo::distance_km,
    model::{InteractionEvent, Score},
    time::hours_between,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const TIME_DECAY_HOURS: f64 = 24.0;
const PROXIMITY_DECAY_KM: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single event seen from a query origin at a given sample time.
pub struct Observation<'a> {
    pub sample_time: DateTime<Utc>,
    pub origin: Origin,
    pub event: &'a InteractionEvent,
}

impl Observation<'_> {
    pub fn time_decay(&self) -> f64 {
        let hours_ago = hours_between(self.event.timestamp, self.sample_time) as f64;
        // future timestamps give a factor above 1 and are left unclamped
        (-hours_ago / TIME_DECAY_HOURS).exp()
    }

    pub fn proximity(&self) -> f64 {
        let distance = distance_km(
            self.origin.latitude,
            self.origin.longitude,
            self.event.latitude,
            self.event.longitude,
        );
        (-distance / PROXIMITY_DECAY_KM).exp()
    }
}

impl Score for Observation<'_> {
    fn score(&self) -> f64 {
        self.event.event_type.base_weight() * self.time_decay() * self.proximity()
    }
}

/// Folds every event into a per-article trending score relative to `origin` at `now`.
/// Articles without events have no entry.
pub fn score_all(
    events: &[InteractionEvent],
    origin: Origin,
    now: DateTime<Utc>,
) -> HashMap<String, f64> {
    let mut scores: HashMap<String, f64> = HashMap::new();
    for event in events {
        let observation = Observation {
            sample_time: now,
            origin,
            event,
        };
        *scores.entry(event.article_id.clone()).or_insert(0.0) += observation.score();
    }
    scores
}
