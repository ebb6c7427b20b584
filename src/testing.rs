//! In-memory collaborators for orchestrator and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::auth::rate_limit::RateLimitState;
use crate::config::Config;
use crate::db::{MoodStore, PlanStore, ProfileStore};
use crate::error::{AppError, AppResult};
use crate::models::mood::MoodSnapshot;
use crate::models::plan::PersonalizedPlan;
use crate::models::profile::UserProfile;
use crate::planner::orchestrator::PlanOrchestrator;
use crate::planner::readiness::RandomSource;
use crate::services::exercise_search::{ExerciseQuery, ExerciseSearch, RemoteExercise};
use crate::services::external_planner::{ExternalPlanResponse, ExternalPlanner, PlannerContext};
use crate::AppState;

pub const FIXED_JITTER: u32 = 4;

pub fn sample_profile(user_id: Uuid) -> UserProfile {
    UserProfile {
        user_id,
        display_name: Some("Sam".into()),
        age: Some(32),
        height_cm: Some(180.0),
        weight_kg: Some(78.0),
        primary_goal: Some("build muscle".into()),
        experience_level: Some("intermediate".into()),
        activity_level: Some("moderate".into()),
        dietary_preference: Some("omnivore".into()),
        equipment: vec!["dumbbells".into(), "resistance bands".into()],
        ..Default::default()
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: Mutex<HashMap<Uuid, UserProfile>>,
}

impl InMemoryProfiles {
    pub fn insert(&self, profile: UserProfile) {
        self.profiles.lock().unwrap().insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfiles {
    async fn get(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.profiles
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(AppError::NotFound("Profile not found".into()))
    }
}

#[derive(Default)]
pub struct InMemoryMoods {
    entries: Mutex<Vec<MoodSnapshot>>,
    pub fail: AtomicBool,
}

impl InMemoryMoods {
    pub fn insert(&self, entry: MoodSnapshot) {
        self.entries.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl MoodStore for InMemoryMoods {
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<MoodSnapshot>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut entries: Vec<MoodSnapshot> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[derive(Default)]
pub struct InMemoryPlans {
    plans: Mutex<Vec<PersonalizedPlan>>,
    pub fail_writes: AtomicBool,
}

impl InMemoryPlans {
    pub fn count(&self) -> usize {
        self.plans.lock().unwrap().len()
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl PlanStore for InMemoryPlans {
    async fn create(&self, plan: PersonalizedPlan) -> AppResult<PersonalizedPlan> {
        self.check_writable()?;
        self.plans.lock().unwrap().push(plan.clone());
        Ok(plan)
    }

    async fn latest(&self, user_id: Uuid) -> AppResult<Option<PersonalizedPlan>> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.updated_at)
            .cloned())
    }

    async fn save(&self, plan: &PersonalizedPlan) -> AppResult<()> {
        self.check_writable()?;
        let mut plans = self.plans.lock().unwrap();
        let stored = plans
            .iter_mut()
            .find(|p| p.id == plan.id)
            .ok_or(AppError::NotFound("Plan not found".into()))?;
        *stored = plan.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct StubPlanner {
    response: Option<ExternalPlanResponse>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ExternalPlanner for StubPlanner {
    async fn request(&self, _profile: &UserProfile, _context: &PlannerContext) -> Option<ExternalPlanResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

#[derive(Default)]
pub struct StubSearch {
    results: Vec<RemoteExercise>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ExerciseSearch for StubSearch {
    async fn search(&self, _query: &ExerciseQuery, limit: usize) -> Vec<RemoteExercise> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.iter().take(limit).cloned().collect()
    }
}

pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn jitter(&self, max: u32) -> u32 {
        self.0.min(max)
    }
}

/// All collaborators in memory; planner and search answer with nothing unless configured.
pub struct Harness {
    pub profiles: Arc<InMemoryProfiles>,
    pub moods: Arc<InMemoryMoods>,
    pub plans: Arc<InMemoryPlans>,
    pub planner: Arc<StubPlanner>,
    pub search: Arc<StubSearch>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(InMemoryProfiles::default()),
            moods: Arc::new(InMemoryMoods::default()),
            plans: Arc::new(InMemoryPlans::default()),
            planner: Arc::new(StubPlanner::default()),
            search: Arc::new(StubSearch::default()),
        }
    }

    pub fn with_external(mut self, response: ExternalPlanResponse) -> Self {
        self.planner = Arc::new(StubPlanner {
            response: Some(response),
            calls: AtomicUsize::new(0),
        });
        self
    }

    pub fn with_search_results(mut self, results: Vec<RemoteExercise>) -> Self {
        self.search = Arc::new(StubSearch {
            results,
            calls: AtomicUsize::new(0),
        });
        self
    }

    pub fn orchestrator(&self) -> PlanOrchestrator {
        PlanOrchestrator::new(
            self.profiles.clone(),
            self.moods.clone(),
            self.plans.clone(),
            self.planner.clone(),
            self.search.clone(),
            Arc::new(FixedRandom(FIXED_JITTER)),
        )
    }
}

/// Config for tests. The database URL points at a closed port.
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://pulseplan@127.0.0.1:1/pulseplan".into(),
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        jwt_secret: "test-secret".into(),
        planner_api_url: None,
        planner_api_key: String::new(),
        planner_timeout_secs: 12,
        exercise_api_url: "http://127.0.0.1:1/v1/exercises".into(),
        exercise_api_key: String::new(),
        exercise_search_limit: 5,
        generate_rate_limit: 2,
        generate_rate_window_secs: 3600,
    }
}

/// App state over the harness collaborators with a lazy, unreachable pool.
pub fn test_state(harness: &Harness) -> AppState {
    let config = test_config();
    let db = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(300))
        .connect_lazy(&config.database_url)
        .unwrap();

    AppState {
        db,
        config: Arc::new(config),
        planner: Arc::new(harness.orchestrator()),
        rate_limiter: RateLimitState::new(),
    }
}
