//! Mood-driven plan changes.
//!
//! Two layers: a coarse [`MoodModifier`] consumed while the schedule is built,
//! and targeted day rewrites applied to the finished baseline. Rewrites always
//! produce new days and sessions; the baseline passed in is left untouched.

use crate::models::mood::MoodSnapshot;
use crate::models::plan::{Intensity, LifestylePlan, PlanDay, PlanSections, PlanSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodModifier {
    Ease,
    Neutral,
    Amplify,
}

const LOW_MOODS: &[&str] = &["tired", "sad", "exhausted", "drained", "low", "burned out"];

impl MoodModifier {
    pub fn from_snapshot(mood: Option<&MoodSnapshot>) -> Self {
        let Some(mood) = mood else {
            return Self::Neutral;
        };
        if LOW_MOODS.iter().any(|m| mood.mood_is(m)) || mood.energy_is("low") {
            Self::Ease
        } else if mood.mood_is("energized") || mood.energy_is("high") {
            Self::Amplify
        } else {
            Self::Neutral
        }
    }
}

const STRESS_DAYS: [&str; 2] = ["Monday", "Friday"];
const STRESS_GUIDANCE: &str =
    "Tempo control today: slow three-second lowering, steady breathing, stop two reps shy of failure.";
const STRESS_HABIT: &str = "Five-minute mindfulness break: sit, close your eyes and follow your breath.";
const SPRINT_GUIDANCE: &str =
    "Ride the energy: log every sprint split and chase your best time on the final round.";

pub fn is_stressed(mood: &MoodSnapshot) -> bool {
    mood.mood_is("stressed") || mood.stress_is("high")
}

pub fn apply_mood_adjustments(baseline: &PlanSections, mood: Option<&MoodSnapshot>) -> PlanSections {
    let Some(mood) = mood else {
        return baseline.clone();
    };

    let stressed = is_stressed(mood);
    let energized = mood.mood_is("energized");

    let schedule = baseline
        .workout_plan
        .schedule
        .iter()
        .map(|day| {
            let mut rebuilt = day.clone();
            if stressed && STRESS_DAYS.contains(&day.day.as_str()) {
                rebuilt = rewrite_session(&rebuilt, 0, Intensity::Moderate, STRESS_GUIDANCE);
            }
            if energized && day.day == "Friday" {
                rebuilt = rewrite_session(&rebuilt, 1, Intensity::High, SPRINT_GUIDANCE);
            }
            rebuilt
        })
        .collect();

    let lifestyle_plan = if stressed {
        LifestylePlan {
            mood_support: baseline
                .lifestyle_plan
                .mood_support
                .iter()
                .cloned()
                .chain(std::iter::once(STRESS_HABIT.to_string()))
                .collect(),
            ..baseline.lifestyle_plan.clone()
        }
    } else {
        baseline.lifestyle_plan.clone()
    };

    let mut adjusted = baseline.clone();
    adjusted.workout_plan.schedule = schedule;
    adjusted.lifestyle_plan = lifestyle_plan;
    adjusted
}

/// New day with session `index` replaced; days without that session come back unchanged.
fn rewrite_session(day: &PlanDay, index: usize, intensity: Intensity, guidance: &str) -> PlanDay {
    let sessions = day
        .sessions
        .iter()
        .enumerate()
        .map(|(i, session)| {
            if i == index {
                PlanSession {
                    intensity,
                    guidance: guidance.to_string(),
                    ..session.clone()
                }
            } else {
                session.clone()
            }
        })
        .collect();

    PlanDay {
        sessions,
        ..day.clone()
    }
}
