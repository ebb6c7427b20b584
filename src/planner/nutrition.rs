//! Adds requested foods to an existing plan as snacks and re-totals the day.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::error::{AppError, AppResult};
use crate::models::plan::{MacroSplit, MealType, NutritionMeal, NutritionPlan, PersonalizedPlan};
use crate::planner::foods::lookup_food;

pub const DEFAULT_PURPOSE: &str = "custom request";

/// Trimmed, non-blank food names. An empty result is a precondition failure.
pub fn requested_foods(foods: &[String]) -> AppResult<Vec<String>> {
    let cleaned: Vec<String> = foods
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        return Err(AppError::PreconditionFailed(
            "At least one food is required to adjust nutrition".into(),
        ));
    }
    Ok(cleaned)
}

pub fn food_snack(food: &str, purpose: &str) -> NutritionMeal {
    let macros = lookup_food(food);
    NutritionMeal {
        name: food.to_string(),
        meal_type: MealType::Snack,
        calories: macros.calories,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
        fiber: Some(macros.fiber),
        ingredients: vec![food.to_string()],
        preparation: None,
        notes: Some(format!("Added for: {}", purpose)),
        swaps: vec![],
    }
}

/// Totals over every meal and snack. Replaces the targets after an adjustment.
pub fn totals(nutrition: &NutritionPlan) -> (i32, MacroSplit) {
    nutrition
        .meals
        .iter()
        .chain(nutrition.snacks.iter())
        .fold((0, MacroSplit::default()), |(calories, split), meal| {
            (
                calories + meal.calories,
                MacroSplit {
                    protein: split.protein + meal.protein,
                    carbs: split.carbs + meal.carbs,
                    fat: split.fat + meal.fat,
                },
            )
        })
}

pub fn adjust_plan_nutrition(
    mut plan: PersonalizedPlan,
    foods: &[String],
    purpose: &str,
    now: DateTime<Utc>,
) -> PersonalizedPlan {
    let nutrition = &mut plan.nutrition_plan;
    nutrition
        .snacks
        .extend(foods.iter().map(|food| food_snack(food, purpose)));

    let (calories, split) = totals(nutrition);
    nutrition.calories_target = calories;
    nutrition.macro_split = split;
    nutrition.guidance.push(format!(
        "Added {} for {}; daily targets now reflect every meal and snack.",
        foods.join(", "),
        purpose
    ));

    record_adjustment(&mut plan.metadata, foods, purpose, now);
    plan.updated_at = now;
    plan
}

fn record_adjustment(metadata: &mut Value, foods: &[String], purpose: &str, now: DateTime<Utc>) {
    if !metadata.is_object() {
        *metadata = Value::Object(Map::new());
    }
    let Some(map) = metadata.as_object_mut() else {
        return;
    };

    map.insert("last_adjustment_reason".into(), json!(purpose));
    map.insert("last_adjustment_foods".into(), json!(foods));

    let entry = json!({
        "reason": purpose,
        "foods": foods,
        "adjusted_at": now,
    });
    match map.get_mut("adjustments").and_then(Value::as_array_mut) {
        Some(history) => history.push(entry),
        None => {
            map.insert("adjustments".into(), Value::Array(vec![entry]));
        }
    }
}
