use rand::Rng;
use serde_json::Value;

use crate::models::mood::MoodSnapshot;
use crate::models::profile::{explicit, UserProfile};
use crate::planner::fallback::DEFAULT_SLEEP_HOURS;

const BASE_SCORE: i32 = 80;
const MAX_JITTER: u32 = 8;
const SCORE_FLOOR: i32 = 75;
const SCORE_CEILING: i32 = 95;

/// Source of the small jitter applied to readiness scores.
pub trait RandomSource: Send + Sync {
    /// Uniform value in `0..=max`.
    fn jitter(&self, max: u32) -> u32;
}

pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn jitter(&self, max: u32) -> u32 {
        rand::thread_rng().gen_range(0..=max)
    }
}

pub fn readiness_score(profile: &UserProfile, mood: Option<&MoodSnapshot>, rng: &dyn RandomSource) -> i32 {
    let mut score = BASE_SCORE + rng.jitter(MAX_JITTER) as i32;

    if let Some(mood) = mood {
        if mood.stress_is("high") {
            score -= 5;
        } else if mood.stress_is("low") {
            score += 3;
        }
    }

    let sleep = explicit(profile.sleep_target_hours).unwrap_or(DEFAULT_SLEEP_HOURS);
    if sleep >= 8.0 {
        score += 2;
    } else if sleep < 7.0 {
        score -= 3;
    }

    score.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Caller-supplied `readiness_score`, clamped to 0..=100.
pub fn override_from_metadata(metadata: &Value) -> Option<i32> {
    let raw = metadata.get("readiness_score")?.as_f64()?;
    Some(raw.round().clamp(0.0, 100.0) as i32)
}
