// Application layer - use cases
pub mod chart_builder;
pub mod dashboard_service;
pub mod dataset_repository;
pub mod loader;
pub mod page_composer;
pub mod render_context;
pub mod sections;
