// Domain layer - data model, chart specs, pages
pub mod chart;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod page;
pub mod series;
