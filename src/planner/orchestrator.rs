//! Drives one plan generation from profile fetch to persistence.
//!
//! Only the profile lookup and the plan store can fail a request. Every other
//! collaborator degrades to an empty answer and the deterministic baseline
//! carries the plan.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::db::{MoodStore, PlanStore, ProfileStore};
use crate::error::{AppError, AppResult};
use crate::models::mood::{most_recent, MoodSnapshot};
use crate::models::plan::PersonalizedPlan;
use crate::planner::blend::blend_plans;
use crate::planner::fallback::{generate_fallback_plan, top_up_sessions};
use crate::planner::mood::apply_mood_adjustments;
use crate::planner::nutrition::{adjust_plan_nutrition, requested_foods, DEFAULT_PURPOSE};
use crate::planner::readiness::{override_from_metadata, readiness_score, RandomSource};
use crate::services::exercise_search::{ExerciseEnricher, ExerciseSearch};
use crate::services::external_planner::{ExternalPlanner, PlannerContext, TranslatedPlan};

pub const DEFAULT_REASON: &str = "on_demand";
const MOOD_LOOKBACK: i64 = 5;
const DEFAULT_SEARCH_LIMIT: usize = 5;

pub struct PlanOrchestrator {
    profiles: Arc<dyn ProfileStore>,
    moods: Arc<dyn MoodStore>,
    plans: Arc<dyn PlanStore>,
    planner: Arc<dyn ExternalPlanner>,
    search: Arc<dyn ExerciseSearch>,
    rng: Arc<dyn RandomSource>,
    search_limit: usize,
}

impl PlanOrchestrator {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        moods: Arc<dyn MoodStore>,
        plans: Arc<dyn PlanStore>,
        planner: Arc<dyn ExternalPlanner>,
        search: Arc<dyn ExerciseSearch>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            profiles,
            moods,
            plans,
            planner,
            search,
            rng,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    async fn recent_mood(&self, user_id: Uuid) -> Option<MoodSnapshot> {
        match self.moods.list_recent(user_id, MOOD_LOOKBACK).await {
            Ok(entries) => most_recent(&entries, Utc::now()),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Mood lookup failed, planning without mood");
                None
            }
        }
    }

    pub async fn generate(
        &self,
        user_id: Uuid,
        reason: Option<String>,
        caller_metadata: Option<Value>,
    ) -> AppResult<PersonalizedPlan> {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        let profile = self.profiles.get(user_id).await?;
        let mood = self.recent_mood(user_id).await;

        let baseline = generate_fallback_plan(&profile, mood.as_ref());
        tracing::debug!(user_id = %user_id, mood = ?mood.as_ref().map(|m| &m.mood), "Baseline built");

        let adjusted = apply_mood_adjustments(&baseline, mood.as_ref());

        let context = PlannerContext {
            reason: reason.clone(),
            mood: mood.clone(),
        };
        let external = self
            .planner
            .request(&profile, &context)
            .await
            .map(TranslatedPlan::from);

        let outcome = blend_plans(adjusted, external.as_ref());
        tracing::debug!(
            user_id = %user_id,
            source = ?outcome.source,
            external = outcome.external_status.as_str(),
            "Plan blended"
        );

        let mut sections = outcome.sections;
        let mut enricher = ExerciseEnricher::new(self.search.as_ref(), self.search_limit);
        let (workout, enriched_sessions) = enricher.enrich(&sections.workout_plan).await;
        sections.workout_plan = top_up_sessions(&workout, &profile);

        let caller_metadata = caller_metadata.unwrap_or(Value::Null);
        let readiness = override_from_metadata(&caller_metadata)
            .unwrap_or_else(|| readiness_score(&profile, mood.as_ref(), self.rng.as_ref()));

        let mut metadata = match caller_metadata {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        metadata.insert("mood_applied".into(), json!(mood.is_some()));
        metadata.insert("mood".into(), json!(mood.as_ref().map(|m| &m.mood)));
        metadata.insert("external_planner".into(), json!(outcome.external_status.as_str()));
        metadata.insert("enriched_sessions".into(), json!(enriched_sessions));
        if let Some(external_metadata) = external.and_then(|e| e.metadata) {
            metadata.insert("external".into(), external_metadata);
        }

        let version = self
            .plans
            .latest(user_id)
            .await?
            .map(|previous| previous.version + 1)
            .unwrap_or(1);

        let now = Utc::now();
        let plan = PersonalizedPlan {
            id: Uuid::new_v4(),
            user_id,
            version,
            source: outcome.source,
            generated_reason: reason,
            workout_plan: sections.workout_plan,
            nutrition_plan: sections.nutrition_plan,
            lifestyle_plan: sections.lifestyle_plan,
            readiness_score: Some(readiness),
            metadata: Value::Object(metadata),
            created_at: now,
            updated_at: now,
        };

        let plan = self.plans.create(plan).await?;
        tracing::info!(
            user_id = %user_id,
            plan_id = %plan.id,
            version = plan.version,
            source = ?plan.source,
            readiness = readiness,
            "Plan generated"
        );
        Ok(plan)
    }

    pub async fn adjust_nutrition(
        &self,
        user_id: Uuid,
        foods: &[String],
        purpose: Option<String>,
    ) -> AppResult<PersonalizedPlan> {
        let foods = requested_foods(foods)?;
        let purpose = purpose
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PURPOSE.to_string());

        let plan = self
            .plans
            .latest(user_id)
            .await?
            .ok_or(AppError::NotFound("No plan to adjust".into()))?;

        let adjusted = adjust_plan_nutrition(plan, &foods, &purpose, Utc::now());
        self.plans.save(&adjusted).await?;

        tracing::info!(
            user_id = %user_id,
            plan_id = %adjusted.id,
            foods = foods.len(),
            "Nutrition adjusted"
        );
        Ok(adjusted)
    }

    pub async fn latest(&self, user_id: Uuid) -> AppResult<Option<PersonalizedPlan>> {
        self.plans.latest(user_id).await
    }
}
