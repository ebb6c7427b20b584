use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile as maintained by the profile service. Read-only to the planner.
///
/// Numeric targets use `None` or a non-positive value for "compute it".
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,

    // Goals
    pub primary_goal: Option<String>,
    pub secondary_goal: Option<String>,
    pub experience_level: Option<String>,
    pub activity_level: Option<String>,

    // Diet
    pub dietary_preference: Option<String>,
    pub dietary_restrictions: Vec<String>,
    pub allergies: Vec<String>,
    pub favorite_foods: Vec<String>,
    pub avoid_foods: Vec<String>,
    pub cuisines: Vec<String>,

    // Environment
    pub equipment: Vec<String>,
    pub training_environment: Option<String>,
    pub injuries: Vec<String>,
    pub sleep_challenges: Vec<String>,

    // Explicit targets
    pub daily_calorie_target: Option<i32>,
    pub protein_target_g: Option<i32>,
    pub carbs_target_g: Option<i32>,
    pub fat_target_g: Option<i32>,
    pub hydration_target_ml: Option<i32>,
    pub sleep_target_hours: Option<f64>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Goal buckets derived from free-text goals. Matching is loose
/// (case-insensitive `contains`) so stored free-text values keep classifying
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    Gain,
    Lose,
    Endurance,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietStyle {
    Vegan,
    Vegetarian,
    Pescatarian,
    Keto,
    Paleo,
    Omnivore,
}

impl UserProfile {
    pub fn goal_text(&self) -> String {
        self.primary_goal.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Calorie and macro classification: gain keywords win over lose keywords.
    pub fn goal_kind(&self) -> GoalKind {
        let goal = self.goal_text();
        if contains_any(&goal, &["gain", "muscle", "build"]) {
            GoalKind::Gain
        } else if contains_any(&goal, &["lose", "cut"]) {
            GoalKind::Lose
        } else if contains_any(&goal, &["endurance", "marathon"]) {
            GoalKind::Endurance
        } else {
            GoalKind::General
        }
    }

    pub fn is_cutting(&self) -> bool {
        contains_any(&self.goal_text(), &["lose", "cut"])
    }

    pub fn experience(&self) -> ExperienceLevel {
        let level = self
            .experience_level
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if level.contains("beginner") {
            ExperienceLevel::Beginner
        } else if level.contains("advanced") {
            ExperienceLevel::Advanced
        } else {
            ExperienceLevel::Intermediate
        }
    }

    pub fn diet_style(&self) -> DietStyle {
        let pref = self
            .dietary_preference
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        // "vegan" before "vegetarian": both start with "veg" but only one contains "vegan"
        if pref.contains("vegan") {
            DietStyle::Vegan
        } else if pref.contains("vegetarian") {
            DietStyle::Vegetarian
        } else if pref.contains("pesc") {
            DietStyle::Pescatarian
        } else if pref.contains("keto") {
            DietStyle::Keto
        } else if pref.contains("paleo") {
            DietStyle::Paleo
        } else {
            DietStyle::Omnivore
        }
    }

    pub fn activity_factor(&self) -> f64 {
        let level = self
            .activity_level
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if level.contains("sedentary") {
            1.2
        } else if level.contains("light") {
            1.375
        } else if contains_any(&level, &["high", "very", "athlete"]) {
            1.725
        } else {
            1.55
        }
    }

    pub fn is_female(&self) -> bool {
        let gender = self.gender.as_deref().unwrap_or_default().trim().to_lowercase();
        gender.starts_with('f') || gender.contains("woman")
    }
}

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Positive explicit target, or `None` when the planner should compute it.
pub fn explicit<T: PartialOrd + Default + Copy>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v > T::default())
}
