pub mod mood;
pub mod plan;
pub mod profile;
