// CSV repository - small local tables, one file per topic
use crate::application::dataset_repository::{DataStatus, DatasetRepository};
use crate::domain::dataset::{Dataset, Topic};
use crate::domain::error::{DashboardError, Result};
use crate::domain::series::{Observation, Series};
use crate::infrastructure::embedded_repository::EmbeddedRepository;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Reads `<data_dir>/<topic>_data.csv`, falling back to the embedded table
/// when the file does not exist.
///
/// Layout: first column is the category label, each further column a series.
/// Empty cells are gaps.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    data_dir: PathBuf,
}

impl CsvRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, topic: Topic) -> PathBuf {
        self.data_dir.join(topic.file_name())
    }

    pub fn parse(topic: Topic, content: &str) -> Result<Dataset> {
        let malformed = |detail: String| DashboardError::malformed(topic.id(), detail);

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| malformed(format!("unreadable header: {}", e)))?
            .clone();

        if headers.len() < 2 {
            return Err(malformed(
                "expected a label column and at least one series column".to_string(),
            ));
        }

        let names: Vec<String> = headers
            .iter()
            .skip(1)
            .map(|h| topic.canonical_series_name(h).to_string())
            .collect();
        let mut columns: Vec<Vec<Observation>> = vec![Vec::new(); names.len()];
        let mut labels: HashSet<String> = HashSet::new();

        for (idx, result) in reader.records().enumerate() {
            // header is line 1
            let line = idx + 2;
            let record = result.map_err(|e| malformed(format!("line {}: {}", line, e)))?;

            let label = record.get(0).unwrap_or_default();
            if label.is_empty() {
                return Err(malformed(format!("line {}: empty label", line)));
            }
            if !labels.insert(label.to_string()) {
                return Err(malformed(format!("line {}: duplicate label '{}'", line, label)));
            }

            for (col, cell) in record.iter().skip(1).enumerate() {
                if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
                    continue;
                }
                let value: f64 = cell.parse().map_err(|_| {
                    malformed(format!(
                        "line {}: '{}' in column '{}' is not a number",
                        line, cell, names[col]
                    ))
                })?;
                if !value.is_finite() {
                    return Err(malformed(format!(
                        "line {}: '{}' in column '{}' is not finite",
                        line, cell, names[col]
                    )));
                }
                columns[col].push(Observation::new(label, value));
            }
        }

        let series = names
            .into_iter()
            .zip(columns)
            .map(|(name, observations)| Series::new(name, observations))
            .collect();

        Dataset::new(topic, series)
    }
}

#[async_trait]
impl DatasetRepository for CsvRepository {
    async fn load_dataset(&self, topic: Topic) -> Result<Dataset> {
        let path = self.path_for(topic);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Self::parse(topic, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, using embedded table", path.display());
                EmbeddedRepository::dataset(topic)
            }
            Err(e) => Err(DashboardError::malformed(
                topic.id(),
                format!("cannot read {}: {}", path.display(), e),
            )),
        }
    }

    async fn data_status(&self, topic: Topic) -> Result<DataStatus> {
        let path = self.path_for(topic);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() != ErrorKind::NotFound => {
                return Err(DashboardError::malformed(
                    topic.id(),
                    format!("cannot read {}: {}", path.display(), e),
                ));
            }
            Err(_) => {
                return Ok(DataStatus {
                    topic,
                    name: topic.display_name(),
                    source: "embedded fallback".to_string(),
                    exists: false,
                    last_updated: "Never".to_string(),
                    rows: 0,
                });
            }
        };

        let last_updated = metadata
            .modified()
            .map(|mtime| DateTime::<Local>::from(mtime).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| "Never".to_string());

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            DashboardError::malformed(topic.id(), format!("cannot read {}: {}", path.display(), e))
        })?;
        let rows = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes())
            .records()
            .count();

        Ok(DataStatus {
            topic,
            name: topic.display_name(),
            source: path.display().to_string(),
            exists: true,
            last_updated,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const GDP_CSV: &str = "Quarter,GDP,Disputed\n\
        Q1 25,-0.5,\n\
        Q2 25,3.8,1.0\n\
        Q3 25,4.3,0.8\n";

    #[test]
    fn test_parse_maps_original_headers() {
        let dataset = CsvRepository::parse(Topic::Gdp, GDP_CSV).unwrap();

        let official = dataset.series("Official_BEA").unwrap();
        assert_eq!(official.values(), vec![-0.5, 3.8, 4.3]);

        let adjusted = dataset.series("Rosenberg_Adjusted").unwrap();
        assert_eq!(adjusted.labels(), vec!["Q2 25", "Q3 25"]);
    }

    #[test]
    fn test_parse_rejects_non_numeric_cells() {
        let err =
            CsvRepository::parse(Topic::Unemployment, "Year,Overall\n2019,high\n").unwrap_err();
        match err {
            DashboardError::MalformedData { topic, detail } => {
                assert_eq!(topic, "unemployment");
                assert!(detail.contains("line 2"));
                assert!(detail.contains("'high'"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let ragged = "Year,Overall,Recent Grads\n2019,3.5,5.0\n2020,8.1\n";
        assert!(matches!(
            CsvRepository::parse(Topic::Unemployment, ragged),
            Err(DashboardError::MalformedData { .. })
        ));

        assert!(CsvRepository::parse(Topic::Unemployment, "Year\n2019\n").is_err());
        assert!(CsvRepository::parse(Topic::Gdp, "Quarter,GDP,GDP\nQ1 25,1,2\n").is_err());
    }

    #[test]
    fn test_parse_rejects_infinite_values() {
        for cell in ["inf", "-inf", "infinity"] {
            let content = format!("Quarter,GDP\nQ1 25,1.0\nQ2 25,{}\n", cell);
            match CsvRepository::parse(Topic::Gdp, &content).unwrap_err() {
                DashboardError::MalformedData { detail, .. } => {
                    assert!(detail.contains("line 3"), "{}", detail);
                    assert!(detail.contains("not finite"), "{}", detail);
                }
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_rejects_duplicate_labels() {
        let content = "Quarter,GDP\nQ1 25,1\nQ1 25,2\nQ2 25,3\n";
        match CsvRepository::parse(Topic::Gdp, content).unwrap_err() {
            DashboardError::MalformedData { topic, detail } => {
                assert_eq!(topic, "gdp");
                assert!(detail.contains("line 3"), "{}", detail);
                assert!(detail.contains("duplicate label 'Q1 25'"), "{}", detail);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reads_file_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gdp_data.csv"), GDP_CSV).unwrap();

        let repo = CsvRepository::new(dir.path());
        let dataset = repo.load_dataset(Topic::Gdp).await.unwrap();
        assert_eq!(dataset.series("Official_BEA").unwrap().len(), 3);

        let status = repo.data_status(Topic::Gdp).await.unwrap();
        assert!(status.exists);
        assert_eq!(status.rows, 3);
        assert_ne!(status.last_updated, "Never");
    }

    #[tokio::test]
    async fn test_unreadable_path_is_malformed_for_load_and_status() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where the data directory should be
        let not_a_dir = dir.path().join("data");
        fs::write(&not_a_dir, "").unwrap();

        let repo = CsvRepository::new(&not_a_dir);
        assert!(matches!(
            repo.load_dataset(Topic::Gdp).await,
            Err(DashboardError::MalformedData { .. })
        ));
        assert!(matches!(
            repo.data_status(Topic::Gdp).await,
            Err(DashboardError::MalformedData { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvRepository::new(dir.path());

        let dataset = repo.load_dataset(Topic::Housing).await.unwrap();
        assert_eq!(dataset, EmbeddedRepository::dataset(Topic::Housing).unwrap());

        let status = repo.data_status(Topic::Housing).await.unwrap();
        assert!(!status.exists);
        assert_eq!(status.last_updated, "Never");
        assert_eq!(status.rows, 0);
    }
}
