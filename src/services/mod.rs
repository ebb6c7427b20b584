pub mod exercise_search;
pub mod external_planner;
