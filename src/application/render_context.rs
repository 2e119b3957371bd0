// Request-scoped render context
use crate::application::loader::DatasetLoader;
use crate::domain::dataset::{Dataset, Topic};
use crate::domain::error::Result;
use std::collections::HashMap;

/// Owns the datasets loaded during one page render.
///
/// Built fresh for every render and dropped with it; nothing is shared
/// between requests.
pub struct RenderContext<'a> {
    loader: &'a DatasetLoader,
    datasets: HashMap<Topic, Dataset>,
}

impl<'a> RenderContext<'a> {
    pub fn new(loader: &'a DatasetLoader) -> Self {
        Self {
            loader,
            datasets: HashMap::new(),
        }
    }

    /// Loads on first use, then serves the same copy for the rest of the render
    pub async fn dataset(&mut self, topic_id: &str) -> Result<&Dataset> {
        let topic: Topic = topic_id.parse()?;
        if !self.datasets.contains_key(&topic) {
            let dataset = self.loader.load_topic(topic).await?;
            self.datasets.insert(topic, dataset);
        }
        Ok(&self.datasets[&topic])
    }

    pub fn loaded_topics(&self) -> usize {
        self.datasets.len()
    }
}
