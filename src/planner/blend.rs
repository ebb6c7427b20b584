//! Merges a translated external plan over the local baseline, section by section.

use crate::models::plan::{
    LifestylePlan, NutritionPlan, PlanDay, PlanSections, PlanSource, WorkoutPlan, WEEK_DAYS,
};
use crate::services::external_planner::{TranslatedLifestyle, TranslatedNutrition, TranslatedPlan};

pub const HYBRID_NUTRITION_NOTE: &str =
    "Meals blend your coach's plan with your profile targets; adjust portions to appetite and training load.";

/// How the external planner contributed, recorded in plan metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalStatus {
    Used,
    Unavailable,
    Empty,
}

impl ExternalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Used => "used",
            Self::Unavailable => "unavailable",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlendOutcome {
    pub sections: PlanSections,
    pub source: PlanSource,
    pub external_status: ExternalStatus,
}

pub fn blend_plans(baseline: PlanSections, external: Option<&TranslatedPlan>) -> BlendOutcome {
    let Some(external) = external else {
        return BlendOutcome {
            sections: baseline,
            source: PlanSource::Fallback,
            external_status: ExternalStatus::Unavailable,
        };
    };

    let (workout_plan, replaced_days) = blend_workout(baseline.workout_plan, external);
    let nutrition_plan = match &external.nutrition {
        Some(nutrition) if !nutrition.meals.is_empty() => blend_nutrition(baseline.nutrition_plan, nutrition),
        _ => baseline.nutrition_plan,
    };
    let lifestyle_plan = match &external.lifestyle {
        Some(lifestyle) => blend_lifestyle(baseline.lifestyle_plan, lifestyle),
        None => baseline.lifestyle_plan,
    };

    // Only a usable schedule makes the plan hybrid
    let (source, external_status) = if replaced_days > 0 {
        (PlanSource::Hybrid, ExternalStatus::Used)
    } else {
        (PlanSource::Fallback, ExternalStatus::Empty)
    };

    BlendOutcome {
        sections: PlanSections {
            workout_plan,
            nutrition_plan,
            lifestyle_plan,
        },
        source,
        external_status,
    }
}

/// Canonical day for an external label: full name, then a 3+ letter prefix
/// ("Mon", "tues"), then the label's position in the external schedule.
fn canonical_day(label: &str, position: usize) -> Option<&'static str> {
    let label = label.trim().to_lowercase();
    let by_name = WEEK_DAYS.iter().copied().find(|day| {
        let day = day.to_lowercase();
        day == label || (label.len() >= 3 && day.starts_with(&label))
    });
    by_name.or_else(|| WEEK_DAYS.get(position).copied())
}

/// Maps external days onto the canonical week. Returns the plan and how many days were replaced.
fn blend_workout(fallback: WorkoutPlan, external: &TranslatedPlan) -> (WorkoutPlan, usize) {
    let resolved: Vec<(&'static str, &PlanDay)> = external
        .schedule
        .iter()
        .enumerate()
        .filter_map(|(i, day)| canonical_day(&day.day, i).map(|name| (name, day)))
        .collect();

    let mut replaced = 0;
    let schedule: Vec<PlanDay> = WEEK_DAYS
        .iter()
        .zip(fallback.schedule)
        .map(|(canonical, fallback_day)| {
            let incoming = resolved
                .iter()
                .find(|(name, day)| name == canonical && !day.sessions.is_empty())
                .map(|(_, day)| *day);
            match incoming {
                Some(day) => {
                    replaced += 1;
                    PlanDay {
                        day: canonical.to_string(),
                        ..day.clone()
                    }
                }
                None => fallback_day,
            }
        })
        .collect();

    let focus_summary = match &external.focus_summary {
        Some(summary) if replaced > 0 => summary.clone(),
        _ => fallback.focus_summary,
    };

    (
        WorkoutPlan {
            focus_summary,
            schedule,
        },
        replaced,
    )
}

fn blend_nutrition(fallback: NutritionPlan, external: &TranslatedNutrition) -> NutritionPlan {
    let guidance = std::iter::once(HYBRID_NUTRITION_NOTE.to_string())
        .chain(external.guidance.iter().cloned())
        .chain(fallback.guidance)
        .collect();

    NutritionPlan {
        calories_target: external.calories_target.unwrap_or(fallback.calories_target),
        macro_split: external.macro_split.unwrap_or(fallback.macro_split),
        hydration_ml: external.hydration_ml.unwrap_or(fallback.hydration_ml),
        meals: external.meals.clone(),
        snacks: if external.snacks.is_empty() {
            fallback.snacks
        } else {
            external.snacks.clone()
        },
        supplements: if external.supplements.is_empty() {
            fallback.supplements
        } else {
            external.supplements.clone()
        },
        guidance,
    }
}

fn blend_lifestyle(fallback: LifestylePlan, external: &TranslatedLifestyle) -> LifestylePlan {
    fn concat(external: &[String], fallback: Vec<String>) -> Vec<String> {
        external.iter().cloned().chain(fallback).collect()
    }

    LifestylePlan {
        sleep: external.sleep.clone().unwrap_or(fallback.sleep),
        mood_support: concat(&external.mood_support, fallback.mood_support),
        recovery_focus: concat(&external.recovery_focus, fallback.recovery_focus),
        micro_habits: concat(&external.micro_habits, fallback.micro_habits),
    }
}
