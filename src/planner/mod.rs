pub mod blend;
pub mod fallback;
pub mod foods;
pub mod library;
pub mod mood;
pub mod nutrition;
pub mod orchestrator;
pub mod readiness;

pub use orchestrator::PlanOrchestrator;
