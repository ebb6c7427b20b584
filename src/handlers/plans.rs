use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::{validated, AdjustNutritionRequest, GeneratePlanRequest};
use crate::error::AppResult;
use crate::models::plan::PersonalizedPlan;
use crate::AppState;

pub async fn generate_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<GeneratePlanRequest>,
) -> AppResult<Json<PersonalizedPlan>> {
    let body = validated(body)?;
    let plan = state
        .planner
        .generate(auth_user.id, body.reason, body.metadata)
        .await?;
    Ok(Json(plan))
}

pub async fn adjust_nutrition(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<AdjustNutritionRequest>,
) -> AppResult<Json<PersonalizedPlan>> {
    let body = validated(body)?;
    let plan = state
        .planner
        .adjust_nutrition(auth_user.id, &body.foods, body.purpose)
        .await?;
    Ok(Json(plan))
}

/// `null` when the user has no plan yet.
pub async fn latest_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Option<PersonalizedPlan>>> {
    let plan = state.planner.latest(auth_user.id).await?;
    Ok(Json(plan))
}
