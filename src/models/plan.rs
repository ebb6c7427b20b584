use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical week, always emitted in this order.
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    High,
    Moderate,
    Low,
    Custom,
}

impl Intensity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" | "hard" => Self::High,
            "moderate" | "medium" => Self::Moderate,
            "low" | "easy" => Self::Low,
            _ => Self::Custom,
        }
    }

    pub fn step_down(self) -> Self {
        match self {
            Self::High => Self::Moderate,
            Self::Moderate | Self::Low => Self::Low,
            Self::Custom => Self::Custom,
        }
    }

    pub fn step_up(self) -> Self {
        match self {
            Self::Low => Self::Moderate,
            Self::Moderate | Self::High => Self::High,
            Self::Custom => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Preworkout,
    Postworkout,
    Custom,
}

impl MealType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" | "supper" => Self::Dinner,
            "snack" => Self::Snack,
            "preworkout" => Self::Preworkout,
            "postworkout" => Self::Postworkout,
            _ => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "plan_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    External,
    Fallback,
    Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanExercise {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSession {
    pub name: String,
    pub focus: String,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub modality: String,
    pub guidance: String,
    pub exercises: Vec<PlanExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecoveryBlock {
    pub focus: String,
    pub duration_minutes: u32,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    pub day: String,
    pub emphasis: String,
    pub sessions: Vec<PlanSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mindset: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub focus_summary: String,
    pub schedule: Vec<PlanDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionMeal {
    pub name: String,
    pub meal_type: MealType,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<i32>,
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub swaps: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroSplit {
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

impl MacroSplit {
    pub fn kcal(&self) -> i32 {
        self.protein * 4 + self.carbs * 4 + self.fat * 9
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionPlan {
    pub calories_target: i32,
    pub macro_split: MacroSplit,
    pub hydration_ml: i32,
    pub meals: Vec<NutritionMeal>,
    pub snacks: Vec<NutritionMeal>,
    pub supplements: Vec<String>,
    pub guidance: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepPlan {
    pub target_hours: f64,
    pub wind_down_rituals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifestylePlan {
    pub sleep: SleepPlan,
    pub mood_support: Vec<String>,
    pub recovery_focus: Vec<String>,
    pub micro_habits: Vec<String>,
}

/// The three locally synthesized sections, before persistence concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSections {
    pub workout_plan: WorkoutPlan,
    pub nutrition_plan: NutritionPlan,
    pub lifestyle_plan: LifestylePlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version: i32,
    pub source: PlanSource,
    pub generated_reason: String,
    pub workout_plan: WorkoutPlan,
    pub nutrition_plan: NutritionPlan,
    pub lifestyle_plan: LifestylePlan,
    pub readiness_score: Option<i32>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
