//! Collaborator stores used by the planner, plus their Postgres implementations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::mood::MoodSnapshot;
use crate::models::plan::PersonalizedPlan;
use crate::models::profile::UserProfile;

pub mod pool;
pub mod postgres;

pub use pool::create_pool;
pub use postgres::{PgMoodStore, PgPlanStore, PgProfileStore};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `AppError::NotFound` when the user has no profile.
    async fn get(&self, user_id: Uuid) -> AppResult<UserProfile>;
}

#[async_trait]
pub trait MoodStore: Send + Sync {
    /// Newest first, at most `limit` entries.
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<MoodSnapshot>>;
}

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn create(&self, plan: PersonalizedPlan) -> AppResult<PersonalizedPlan>;

    /// The user's most recently updated plan.
    async fn latest(&self, user_id: Uuid) -> AppResult<Option<PersonalizedPlan>>;

    async fn save(&self, plan: &PersonalizedPlan) -> AppResult<()>;
}
