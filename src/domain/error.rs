// Dashboard error taxonomy
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Topic identifier is unknown, or the source has no table for it
    #[error("missing data: no dataset for topic '{topic}'")]
    MissingData { topic: String },

    /// A chart references a series (or label) the dataset does not have
    #[error("spec/data mismatch: chart '{chart}' references {what} not found in topic '{topic}'")]
    SpecMismatch {
        chart: String,
        topic: String,
        what: String,
    },

    /// Embedded or on-disk table has the wrong type or shape
    #[error("malformed data for topic '{topic}': {detail}")]
    MalformedData { topic: String, detail: String },

    /// ChartSpec rejected at construction
    #[error("invalid chart spec: {0}")]
    InvalidSpec(String),
}

impl DashboardError {
    pub fn missing(topic: impl Into<String>) -> Self {
        Self::MissingData {
            topic: topic.into(),
        }
    }

    pub fn malformed(topic: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedData {
            topic: topic.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidSpec(detail.into())
    }

    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }

    pub fn is_spec_mismatch(&self) -> bool {
        matches!(self, Self::SpecMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_topic() {
        let err = DashboardError::missing("crypto");
        assert_eq!(err.to_string(), "missing data: no dataset for topic 'crypto'");

        let err = DashboardError::SpecMismatch {
            chart: "GDP".to_string(),
            topic: "gdp".to_string(),
            what: "series 'Nowcast'".to_string(),
        };
        assert!(err.to_string().contains("series 'Nowcast'"));
        assert!(err.is_spec_mismatch());
        assert!(!err.is_missing_data());
    }
}
