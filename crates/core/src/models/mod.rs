pub mod analytics;
pub mod fund;
pub mod plan;
pub mod registry;
pub mod simulation;
