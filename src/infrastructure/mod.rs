// Infrastructure layer - data sources and settings
pub mod config;
pub mod csv_repository;
pub mod embedded_repository;
