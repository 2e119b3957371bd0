// Dashboard service - use case for rendering dashboard sections
use crate::application::dataset_repository::{DataStatus, DatasetRepository};
use crate::application::loader::DatasetLoader;
use crate::application::page_composer::PageComposer;
use crate::application::sections::Section;
use crate::domain::dataset::Dataset;
use crate::domain::error::Result;
use crate::domain::page::Page;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    loader: DatasetLoader,
    composer: PageComposer,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DatasetRepository>) -> Self {
        let loader = DatasetLoader::new(repository);
        let composer = PageComposer::new(loader.clone());
        Self { loader, composer }
    }

    /// Rebuilt from scratch on every call
    pub async fn render_section(&self, section: Section) -> Result<Page> {
        let blocks = section.blocks()?;
        Ok(self.composer.compose(section.heading(), &blocks).await)
    }

    pub async fn dataset(&self, topic_id: &str) -> Result<Dataset> {
        self.loader.load(topic_id).await
    }

    pub async fn data_status(&self) -> Vec<DataStatus> {
        self.loader.status().await
    }
}
