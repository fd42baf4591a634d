pub mod advisory_service;
pub mod allocation;
pub mod analytics_service;
pub mod plan_service;
pub mod protection;
pub mod scheduler;
pub mod simulation_service;
