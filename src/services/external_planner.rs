//! Client for the third-party workout/nutrition planner.
//!
//! The planner is optional: missing configuration, timeouts, non-2xx answers
//! and malformed bodies all degrade to `None` and are only logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::models::mood::MoodSnapshot;
use crate::models::plan::{
    Intensity, MacroSplit, MealType, NutritionMeal, PlanDay, PlanExercise, PlanSession,
    RecoveryBlock, SleepPlan,
};
use crate::models::profile::UserProfile;

const DEFAULT_SESSION_MINUTES: u32 = 45;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("planner endpoint not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("planner returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannerContext {
    pub reason: String,
    pub mood: Option<MoodSnapshot>,
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalPlanResponse {
    #[serde(default)]
    pub focus_summary: Option<String>,
    #[serde(default)]
    pub schedule: Vec<ExternalDay>,
    #[serde(default)]
    pub nutrition_plan: Option<ExternalNutrition>,
    #[serde(default)]
    pub lifestyle_plan: Option<ExternalLifestyle>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalDay {
    pub day: String,
    #[serde(default, alias = "focus")]
    pub emphasis: Option<String>,
    #[serde(default)]
    pub sessions: Vec<ExternalSession>,
    #[serde(default)]
    pub recovery: Option<ExternalRecovery>,
    #[serde(default)]
    pub mindset: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalSession {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default, alias = "type")]
    pub modality: Option<String>,
    #[serde(default, alias = "notes")]
    pub guidance: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExternalExercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalExercise {
    pub name: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<serde_json::Value>,
    #[serde(default)]
    pub tempo: Option<String>,
    #[serde(default, alias = "rest")]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalRecovery {
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalNutrition {
    #[serde(default, alias = "calories")]
    pub calories_target: Option<i32>,
    #[serde(default, alias = "macros")]
    pub macro_split: Option<MacroSplit>,
    #[serde(default)]
    pub hydration_ml: Option<i32>,
    #[serde(default)]
    pub meals: Vec<ExternalMeal>,
    #[serde(default)]
    pub snacks: Vec<ExternalMeal>,
    #[serde(default)]
    pub supplements: Vec<String>,
    #[serde(default)]
    pub guidance: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalMeal {
    pub name: String,
    #[serde(default, alias = "type")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub protein: i32,
    #[serde(default)]
    pub carbs: i32,
    #[serde(default)]
    pub fat: i32,
    #[serde(default)]
    pub fiber: Option<i32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub preparation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub swaps: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalLifestyle {
    #[serde(default)]
    pub sleep: Option<ExternalSleep>,
    #[serde(default)]
    pub mood_support: Vec<String>,
    #[serde(default)]
    pub recovery_focus: Vec<String>,
    #[serde(default)]
    pub micro_habits: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalSleep {
    #[serde(alias = "hours")]
    pub target_hours: f64,
    #[serde(default, alias = "wind_down")]
    pub wind_down_rituals: Vec<String>,
}

// ============================================================================
// Translation into the plan model
// ============================================================================

/// External output expressed in plan types, ready for blending.
#[derive(Debug, Clone, Default)]
pub struct TranslatedPlan {
    pub focus_summary: Option<String>,
    pub schedule: Vec<PlanDay>,
    pub nutrition: Option<TranslatedNutrition>,
    pub lifestyle: Option<TranslatedLifestyle>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct TranslatedNutrition {
    pub calories_target: Option<i32>,
    pub macro_split: Option<MacroSplit>,
    pub hydration_ml: Option<i32>,
    pub meals: Vec<NutritionMeal>,
    pub snacks: Vec<NutritionMeal>,
    pub supplements: Vec<String>,
    pub guidance: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TranslatedLifestyle {
    pub sleep: Option<SleepPlan>,
    pub mood_support: Vec<String>,
    pub recovery_focus: Vec<String>,
    pub micro_habits: Vec<String>,
}

impl From<ExternalPlanResponse> for TranslatedPlan {
    fn from(response: ExternalPlanResponse) -> Self {
        Self {
            focus_summary: response
                .focus_summary
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            schedule: response.schedule.into_iter().map(translate_day).collect(),
            nutrition: response.nutrition_plan.map(translate_nutrition),
            lifestyle: response.lifestyle_plan.map(|l| TranslatedLifestyle {
                sleep: l.sleep.map(|s| SleepPlan {
                    target_hours: s.target_hours,
                    wind_down_rituals: s.wind_down_rituals,
                }),
                mood_support: l.mood_support,
                recovery_focus: l.recovery_focus,
                micro_habits: l.micro_habits,
            }),
            metadata: response.metadata,
        }
    }
}

fn translate_day(day: ExternalDay) -> PlanDay {
    PlanDay {
        day: day.day.trim().to_string(),
        emphasis: day.emphasis.unwrap_or_else(|| "Coach-designed session".into()),
        sessions: day.sessions.into_iter().map(translate_session).collect(),
        recovery: day.recovery.map(|r| RecoveryBlock {
            focus: r.focus.unwrap_or_else(|| "Recovery".into()),
            duration_minutes: r.duration_minutes.unwrap_or(15),
            notes: r.notes.unwrap_or_default(),
        }),
        mindset: day.mindset,
    }
}

fn translate_session(session: ExternalSession) -> PlanSession {
    let focus = session
        .focus
        .map(|f| f.trim().to_lowercase().replace([' ', '-'], "_"))
        .unwrap_or_else(|| "full_body".into());
    PlanSession {
        name: session.name,
        modality: session.modality.unwrap_or_else(|| focus.clone()),
        focus,
        duration_minutes: session.duration_minutes.unwrap_or(DEFAULT_SESSION_MINUTES),
        intensity: session
            .intensity
            .as_deref()
            .map(Intensity::parse)
            .unwrap_or(Intensity::Moderate),
        guidance: session.guidance.unwrap_or_default(),
        exercises: session.exercises.into_iter().map(translate_exercise).collect(),
    }
}

fn translate_exercise(exercise: ExternalExercise) -> PlanExercise {
    // Planners send reps both as numbers and as strings like "8-10"
    let reps = exercise.reps.and_then(|r| match r {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    PlanExercise {
        name: exercise.name,
        sets: exercise.sets,
        reps,
        tempo: exercise.tempo,
        rest_seconds: exercise.rest_seconds,
        notes: exercise.notes,
    }
}

fn translate_meal(meal: ExternalMeal, default_type: MealType) -> NutritionMeal {
    NutritionMeal {
        name: meal.name,
        meal_type: meal
            .meal_type
            .as_deref()
            .map(MealType::parse)
            .unwrap_or(default_type),
        calories: meal.calories,
        protein: meal.protein,
        carbs: meal.carbs,
        fat: meal.fat,
        fiber: meal.fiber,
        ingredients: meal.ingredients,
        preparation: meal.preparation,
        notes: meal.notes,
        swaps: meal.swaps,
    }
}

fn translate_nutrition(nutrition: ExternalNutrition) -> TranslatedNutrition {
    TranslatedNutrition {
        calories_target: nutrition.calories_target.filter(|c| *c > 0),
        macro_split: nutrition.macro_split,
        hydration_ml: nutrition.hydration_ml.filter(|h| *h > 0),
        meals: nutrition
            .meals
            .into_iter()
            .map(|m| translate_meal(m, MealType::Custom))
            .collect(),
        snacks: nutrition
            .snacks
            .into_iter()
            .map(|m| translate_meal(m, MealType::Snack))
            .collect(),
        supplements: nutrition.supplements,
        guidance: nutrition.guidance,
    }
}

// ============================================================================
// Client
// ============================================================================

#[async_trait]
pub trait ExternalPlanner: Send + Sync {
    /// `None` whenever the planner could not produce a usable answer.
    async fn request(&self, profile: &UserProfile, context: &PlannerContext) -> Option<ExternalPlanResponse>;
}

pub struct ExternalPlannerClient {
    client: Client,
    url: Option<String>,
    api_key: String,
}

impl ExternalPlannerClient {
    pub fn new(url: Option<String>, api_key: String, timeout: Duration) -> Result<Self, PlannerError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PlannerError> {
        Self::new(
            config.planner_api_url.clone(),
            config.planner_api_key.clone(),
            Duration::from_secs(config.planner_timeout_secs),
        )
    }

    async fn call(&self, profile: &UserProfile, context: &PlannerContext) -> Result<ExternalPlanResponse, PlannerError> {
        let url = self.url.as_deref().ok_or(PlannerError::NotConfigured)?;

        let mut request = self.client.post(url).json(&serde_json::json!({
            "profile": profile,
            "context": context,
        }));
        if !self.api_key.is_empty() {
            request = request.header("x-api-key", &self.api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::Status { status, body });
        }

        Ok(response.json::<ExternalPlanResponse>().await?)
    }
}

#[async_trait]
impl ExternalPlanner for ExternalPlannerClient {
    async fn request(&self, profile: &UserProfile, context: &PlannerContext) -> Option<ExternalPlanResponse> {
        match self.call(profile, context).await {
            Ok(plan) => Some(plan),
            Err(PlannerError::NotConfigured) => {
                tracing::debug!("External planner not configured, skipping");
                None
            }
            Err(e) => {
                tracing::warn!(user_id = %profile.user_id, error = %e, "External planner unavailable, using fallback");
                None
            }
        }
    }
}
