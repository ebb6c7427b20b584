use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: String,
    pub stress_level: Option<String>,
    pub energy_level: Option<String>,
    pub motivation_level: Option<String>,
    pub tags: Vec<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entries older than this are ignored by the planner.
pub const RECENT_MOOD_WINDOW_HOURS: i64 = 24;
/// Entries stamped this far ahead of `now` still count, to absorb clock skew between services.
pub const CLOCK_SKEW_MINUTES: i64 = 5;

impl MoodSnapshot {
    pub fn mood_is(&self, value: &str) -> bool {
        self.mood.trim().eq_ignore_ascii_case(value)
    }

    pub fn stress_is(&self, value: &str) -> bool {
        level_is(self.stress_level.as_deref(), value)
    }

    pub fn energy_is(&self, value: &str) -> bool {
        level_is(self.energy_level.as_deref(), value)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

fn level_is(level: Option<&str>, value: &str) -> bool {
    level.map(|l| l.trim().eq_ignore_ascii_case(value)).unwrap_or(false)
}

/// Most recent snapshot created within the last 24 hours of `now`.
pub fn most_recent(snapshots: &[MoodSnapshot], now: DateTime<Utc>) -> Option<MoodSnapshot> {
    let cutoff = now - Duration::hours(RECENT_MOOD_WINDOW_HOURS);
    let horizon = now + Duration::minutes(CLOCK_SKEW_MINUTES);
    snapshots
        .iter()
        .filter(|s| s.created_at >= cutoff && s.created_at <= horizon)
        .max_by_key(|s| s.created_at)
        .cloned()
}

#[cfg(test)]
pub fn snapshot(mood: &str, stress: Option<&str>, created_at: DateTime<Utc>) -> MoodSnapshot {
    MoodSnapshot {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        mood: mood.into(),
        stress_level: stress.map(Into::into),
        energy_level: None,
        motivation_level: None,
        tags: vec![],
        note: None,
        created_at,
    }
}
