// Page composer - resolves configured blocks into a rendered page
use crate::application::chart_builder::build_chart;
use crate::application::loader::DatasetLoader;
use crate::application::render_context::RenderContext;
use crate::domain::chart::ChartSpec;
use crate::domain::error::Result;
use crate::domain::page::{BlockSpec, Page, RenderedBlock};

#[derive(Clone)]
pub struct PageComposer {
    loader: DatasetLoader,
}

impl PageComposer {
    pub fn new(loader: DatasetLoader) -> Self {
        Self { loader }
    }

    /// Blocks keep their configured order. A chart that cannot be built is
    /// replaced by an error block; the remaining blocks still render.
    pub async fn compose(&self, title: &str, blocks: &[BlockSpec]) -> Page {
        let mut ctx = RenderContext::new(&self.loader);
        let mut rendered = Vec::with_capacity(blocks.len());

        for (index, block) in blocks.iter().enumerate() {
            match block {
                BlockSpec::Text(text) => rendered.push(RenderedBlock::Text { text: text.clone() }),
                BlockSpec::Chart { topic, spec } => {
                    match Self::render_chart(&mut ctx, index, topic, spec).await {
                        Ok(chart) => rendered.push(chart),
                        Err(e) => {
                            tracing::warn!(
                                "Error rendering block {} ({}): {}",
                                index,
                                spec.title(),
                                e
                            );
                            rendered.push(RenderedBlock::Error {
                                index,
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        tracing::debug!(
            "Composed page '{}': {} blocks, {} datasets loaded",
            title,
            rendered.len(),
            ctx.loaded_topics()
        );

        Page::new(title, rendered)
    }

    async fn render_chart(
        ctx: &mut RenderContext<'_>,
        index: usize,
        topic: &str,
        spec: &ChartSpec,
    ) -> Result<RenderedBlock> {
        let dataset = ctx.dataset(topic).await?;
        let figure = build_chart(dataset, spec)?;
        Ok(RenderedBlock::Chart {
            id: format!("chart-{}", index),
            topic: dataset.topic(),
            figure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{BarColoring, ChartFrame, Color, LineTrace, TraceSpec};
    use crate::domain::page::TextBlock;
    use crate::infrastructure::csv_repository::CsvRepository;
    use crate::infrastructure::embedded_repository::EmbeddedRepository;
    use std::sync::Arc;

    fn composer() -> PageComposer {
        PageComposer::new(DatasetLoader::new(Arc::new(EmbeddedRepository::new())))
    }

    fn line(topic: &str, series: &str) -> BlockSpec {
        let spec = ChartSpec::line(
            ChartFrame::new(format!("{} / {}", topic, series)),
            vec![LineTrace::new(TraceSpec::new(series, series, Color::BLUE))],
        )
        .unwrap();
        BlockSpec::chart(topic, spec)
    }

    #[tokio::test]
    async fn test_broken_block_does_not_stop_the_page() {
        let blocks = vec![
            line("gdp", "Official_BEA"),
            line("sentiment", "Michigan"),
            line("sentiment", "Gallup"),
            line("unemployment", "Recent_Grads"),
            line("vehicles", "Avg_Monthly_Payment"),
        ];

        let page = composer().compose("Mixed", &blocks).await;
        assert_eq!(page.blocks.len(), 5);
        assert_eq!(page.figures().len(), 4);
        assert_eq!(page.error_count(), 1);

        for (i, block) in page.blocks.iter().enumerate() {
            match block {
                RenderedBlock::Chart { id, .. } => assert_eq!(id, &format!("chart-{}", i)),
                RenderedBlock::Error { index, message } => {
                    assert_eq!((i, *index), (2, 2));
                    assert!(message.contains("spec/data mismatch"));
                    assert!(message.contains("Gallup"));
                }
                other => panic!("unexpected block {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_topic_renders_error_block() {
        let blocks = vec![
            BlockSpec::text(TextBlock::heading(2, "Crypto")),
            line("crypto", "BTC"),
            BlockSpec::text(TextBlock::paragraph("after")),
        ];

        let page = composer().compose("Crypto", &blocks).await;
        assert!(matches!(page.blocks[0], RenderedBlock::Text { .. }));
        match &page.blocks[1] {
            RenderedBlock::Error { index, message } => {
                assert_eq!(*index, 1);
                assert!(message.starts_with("missing data"));
            }
            other => panic!("unexpected block {:?}", other),
        }
        assert!(matches!(page.blocks[2], RenderedBlock::Text { .. }));
    }

    #[tokio::test]
    async fn test_malformed_table_renders_error_block() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gdp_data.csv"), "Quarter,GDP\nQ1 25,abc\n").unwrap();
        let repository = Arc::new(CsvRepository::new(dir.path()));
        let composer = PageComposer::new(DatasetLoader::new(repository));

        let blocks = vec![
            line("gdp", "Official_BEA"),
            line("housing", "Median_Price_K"),
        ];

        let page = composer.compose("Malformed", &blocks).await;
        assert_eq!(page.error_count(), 1);
        match &page.blocks[0] {
            RenderedBlock::Error { index, message } => {
                assert_eq!(*index, 0);
                assert!(message.starts_with("malformed data"), "{}", message);
                assert!(message.contains("'abc'"), "{}", message);
            }
            other => panic!("unexpected block {:?}", other),
        }
        assert!(matches!(page.blocks[1], RenderedBlock::Chart { .. }));
        assert_eq!(page.figures().len(), 1);
    }

    #[tokio::test]
    async fn test_order_is_preserved() {
        let bar = ChartSpec::bar(
            ChartFrame::new("Expectations"),
            TraceSpec::new("Expectations_Index", "Expectations Index", Color::BLUE),
            BarColoring::Solid,
        )
        .unwrap();
        let blocks = vec![
            BlockSpec::chart("expectations", bar),
            BlockSpec::text(TextBlock::Divider),
            line("housing", "Median_Price_K"),
        ];

        let page = composer().compose("Order", &blocks).await;
        let titles: Vec<&str> = page.figures().iter().map(|f| f.title()).collect();
        assert_eq!(titles, vec!["Expectations", "housing / Median_Price_K"]);
        assert!(matches!(
            page.blocks[1],
            RenderedBlock::Text {
                text: TextBlock::Divider
            }
        ));
    }
}
