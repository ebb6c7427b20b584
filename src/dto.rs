//! Request DTOs for the plan endpoints.
//!
//! Shape checks live here via `validator`; business preconditions (such as an
//! empty food list) are enforced by the planner so every caller gets them.

use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// POST /api/plans/generate
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GeneratePlanRequest {
    #[validate(length(max = 200, message = "Reason must be at most 200 characters"))]
    pub reason: Option<String>,

    /// Copied into plan metadata; `readiness_score` overrides the computed score.
    pub metadata: Option<serde_json::Value>,
}

/// POST /api/plans/nutrition
#[derive(Debug, Deserialize, Validate)]
pub struct AdjustNutritionRequest {
    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 foods per adjustment"))]
    pub foods: Vec<String>,

    #[validate(length(max = 200, message = "Purpose must be at most 200 characters"))]
    pub purpose: Option<String>,
}

pub fn validated<T: Validate>(request: T) -> Result<T, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(request)
}
