// Dataset loader - use case for resolving a topic identifier to a dataset
use crate::application::dataset_repository::{DataStatus, DatasetRepository};
use crate::domain::dataset::{Dataset, Topic};
use crate::domain::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct DatasetLoader {
    repository: Arc<dyn DatasetRepository>,
}

impl DatasetLoader {
    pub fn new(repository: Arc<dyn DatasetRepository>) -> Self {
        Self { repository }
    }

    /// Unrecognized topic identifiers fail with `MissingData`
    pub async fn load(&self, topic_id: &str) -> Result<Dataset> {
        let topic: Topic = topic_id.parse()?;
        self.load_topic(topic).await
    }

    pub async fn load_topic(&self, topic: Topic) -> Result<Dataset> {
        tracing::debug!("Loading dataset for topic {}", topic);
        self.repository.load_dataset(topic).await
    }

    pub async fn status(&self) -> Vec<DataStatus> {
        let mut statuses = Vec::with_capacity(Topic::ALL.len());
        for topic in Topic::ALL {
            match self.repository.data_status(topic).await {
                Ok(status) => statuses.push(status),
                Err(e) => tracing::warn!("Error reading data status for {}: {}", topic, e),
            }
        }
        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DashboardError;
    use crate::infrastructure::embedded_repository::EmbeddedRepository;
    use async_trait::async_trait;

    struct EmptyRepository;

    #[async_trait]
    impl DatasetRepository for EmptyRepository {
        async fn load_dataset(&self, topic: Topic) -> Result<Dataset> {
            Err(DashboardError::missing(topic.id()))
        }

        async fn data_status(&self, topic: Topic) -> Result<DataStatus> {
            Err(DashboardError::missing(topic.id()))
        }
    }

    fn embedded_loader() -> DatasetLoader {
        DatasetLoader::new(Arc::new(EmbeddedRepository::new()))
    }

    #[tokio::test]
    async fn test_known_topics_load() {
        let loader = embedded_loader();
        for topic in Topic::ALL {
            let dataset = loader.load(topic.id()).await.unwrap();
            assert_eq!(dataset.topic(), topic);
        }
    }

    #[tokio::test]
    async fn test_unknown_topics_are_missing_data() {
        let loader = embedded_loader();
        for topic_id in ["", "crypto", "gdp2", "inflation"] {
            let err = loader.load(topic_id).await.unwrap_err();
            assert!(err.is_missing_data(), "{} gave {:?}", topic_id, err);
        }
    }

    #[tokio::test]
    async fn test_repository_without_table_is_missing_data() {
        let loader = DatasetLoader::new(Arc::new(EmptyRepository));
        let err = loader.load("gdp").await.unwrap_err();
        assert_eq!(err, DashboardError::missing("gdp"));
        assert!(loader.status().await.is_empty());
    }
}
