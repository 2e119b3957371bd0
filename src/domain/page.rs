// Page domain model - configured blocks in, rendered blocks out
use super::chart::ChartSpec;
use super::dataset::Topic;
use super::figure::Figure;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
    /// A rising delta is bad news (rendered red)
    pub inverse: bool,
}

impl Metric {
    pub fn new(label: &str, value: &str, delta: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            delta: Some(delta.to_string()).filter(|d| !d.is_empty()),
            inverse: false,
        }
    }

    pub fn inverse(mut self) -> Self {
        self.inverse = true;
        self
    }
}

/// Narrative content. Paragraph-like text accepts `**bold**`, `*italic*`
/// and `- ` bullet lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Callout { tone: Tone, text: String },
    Metrics { items: Vec<Metric> },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    Expander { title: String, text: String, expanded: bool },
    Caption { text: String },
    Divider,
}

impl TextBlock {
    pub fn heading(level: u8, text: &str) -> Self {
        Self::Heading {
            level: level.clamp(1, 4),
            text: text.to_string(),
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::Paragraph {
            text: text.to_string(),
        }
    }

    pub fn callout(tone: Tone, text: &str) -> Self {
        Self::Callout {
            tone,
            text: text.to_string(),
        }
    }

    pub fn metrics(items: Vec<Metric>) -> Self {
        Self::Metrics { items }
    }

    pub fn table(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    pub fn expander(title: &str, text: &str, expanded: bool) -> Self {
        Self::Expander {
            title: title.to_string(),
            text: text.to_string(),
            expanded,
        }
    }

    pub fn caption(text: &str) -> Self {
        Self::Caption {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockSpec {
    /// Topic is kept as the raw identifier; it is resolved at render time
    Chart { topic: String, spec: ChartSpec },
    Text(TextBlock),
}

impl BlockSpec {
    pub fn chart(topic: impl Into<String>, spec: ChartSpec) -> Self {
        Self::Chart {
            topic: topic.into(),
            spec,
        }
    }

    pub fn text(block: TextBlock) -> Self {
        Self::Text(block)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum RenderedBlock {
    Chart {
        id: String,
        topic: Topic,
        figure: Figure,
    },
    Text {
        text: TextBlock,
    },
    /// Inline error indicator in place of a chart that failed to build
    Error { index: usize, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<RenderedBlock>,
}

impl Page {
    pub fn new(title: impl Into<String>, blocks: Vec<RenderedBlock>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }

    pub fn figures(&self) -> Vec<&Figure> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                RenderedBlock::Chart { figure, .. } => Some(figure),
                _ => None,
            })
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, RenderedBlock::Error { .. }))
            .count()
    }
}
