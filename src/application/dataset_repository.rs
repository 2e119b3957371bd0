// Repository trait for dataset access
use crate::domain::dataset::{Dataset, Topic};
use crate::domain::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Where a topic's table comes from and how fresh it is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStatus {
    pub topic: Topic,
    pub name: &'static str,
    pub source: String,
    pub exists: bool,
    pub last_updated: String,
    pub rows: usize,
}

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Load every series for a topic. `MissingData` if the source has no table.
    async fn load_dataset(&self, topic: Topic) -> Result<Dataset>;

    /// Describe the backing table for a topic
    async fn data_status(&self, topic: Topic) -> Result<DataStatus>;
}
