use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::{MoodStore, PlanStore, ProfileStore};
use crate::error::{AppError, AppResult};
use crate::models::mood::MoodSnapshot;
use crate::models::plan::{LifestylePlan, NutritionPlan, PersonalizedPlan, PlanSource, WorkoutPlan};
use crate::models::profile::UserProfile;

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: Uuid) -> AppResult<UserProfile> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AppError::NotFound("Profile not found".into()))
    }
}

#[derive(Clone)]
pub struct PgMoodStore {
    db: PgPool,
}

impl PgMoodStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MoodStore for PgMoodStore {
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<MoodSnapshot>> {
        let entries = sqlx::query_as::<_, MoodSnapshot>(
            r#"
            SELECT id, user_id, mood, stress_level, energy_level, motivation_level,
                   tags, note, created_at
            FROM mood_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}

/// Sections are stored as JSONB columns.
#[derive(FromRow)]
struct PlanRow {
    id: Uuid,
    user_id: Uuid,
    version: i32,
    source: PlanSource,
    generated_reason: String,
    workout_plan: Json<WorkoutPlan>,
    nutrition_plan: Json<NutritionPlan>,
    lifestyle_plan: Json<LifestylePlan>,
    readiness_score: Option<i32>,
    metadata: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlanRow> for PersonalizedPlan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            version: row.version,
            source: row.source,
            generated_reason: row.generated_reason,
            workout_plan: row.workout_plan.0,
            nutrition_plan: row.nutrition_plan.0,
            lifestyle_plan: row.lifestyle_plan.0,
            readiness_score: row.readiness_score,
            metadata: row.metadata.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgPlanStore {
    db: PgPool,
}

impl PgPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn create(&self, plan: PersonalizedPlan) -> AppResult<PersonalizedPlan> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO personalized_plans
                (id, user_id, version, source, generated_reason, workout_plan,
                 nutrition_plan, lifestyle_plan, readiness_score, metadata,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(plan.version)
        .bind(plan.source)
        .bind(&plan.generated_reason)
        .bind(Json(&plan.workout_plan))
        .bind(Json(&plan.nutrition_plan))
        .bind(Json(&plan.lifestyle_plan))
        .bind(plan.readiness_score)
        .bind(Json(&plan.metadata))
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn latest(&self, user_id: Uuid) -> AppResult<Option<PersonalizedPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT * FROM personalized_plans
            WHERE user_id = $1
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, plan: &PersonalizedPlan) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE personalized_plans
            SET workout_plan = $2, nutrition_plan = $3, lifestyle_plan = $4,
                readiness_score = $5, metadata = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(plan.id)
        .bind(Json(&plan.workout_plan))
        .bind(Json(&plan.nutrition_plan))
        .bind(Json(&plan.lifestyle_plan))
        .bind(plan.readiness_score)
        .bind(Json(&plan.metadata))
        .bind(plan.updated_at)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Plan not found".into()));
        }
        Ok(())
    }
}
