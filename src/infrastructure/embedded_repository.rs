// Embedded repository - literal year-end 2025 reference tables
use crate::application::dataset_repository::{DataStatus, DatasetRepository};
use crate::domain::dataset::{Dataset, Topic};
use crate::domain::error::{DashboardError, Result};
use crate::domain::series::{Observation, Series};
use async_trait::async_trait;

const QUARTERS: [&str; 23] = [
    "Q1 20", "Q2 20", "Q3 20", "Q4 20", "Q1 21", "Q2 21", "Q3 21", "Q4 21", "Q1 22", "Q2 22",
    "Q3 22", "Q4 22", "Q1 23", "Q2 23", "Q3 23", "Q4 23", "Q1 24", "Q2 24", "Q3 24", "Q4 24",
    "Q1 25", "Q2 25", "Q3 25",
];

const SENTIMENT_PERIODS: [&str; 23] = [
    "Jan 19", "Jul 19", "Dec 19", "Jan 20", "Apr 20", "Jul 20", "Dec 20", "Jan 21", "Jul 21",
    "Dec 21", "Jan 22", "Jun 22", "Dec 22", "Jan 23", "Jul 23", "Dec 23", "Jan 24", "Jul 24",
    "Dec 24", "Jan 25", "Apr 25", "Jul 25", "Dec 25",
];

const MONTHS: [&str; 24] = [
    "Jan 24", "Feb 24", "Mar 24", "Apr 24", "May 24", "Jun 24", "Jul 24", "Aug 24", "Sep 24",
    "Oct 24", "Nov 24", "Dec 24", "Jan 25", "Feb 25", "Mar 25", "Apr 25", "May 25", "Jun 25",
    "Jul 25", "Aug 25", "Sep 25", "Oct 25", "Nov 25", "Dec 25",
];

const YEARS: [&str; 7] = ["2019", "2020", "2021", "2022", "2023", "2024", "2025"];

/// A column of a literal table; `None` is a gap
type Column<'a> = (&'a str, Vec<Option<f64>>);

#[derive(Debug, Clone, Default)]
pub struct EmbeddedRepository;

impl EmbeddedRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn dataset(topic: Topic) -> Result<Dataset> {
        match topic {
            Topic::Gdp => {
                let mut disputed = [None; 23];
                // Q2 25 ~0.5-1.5% (midpoint), Q3 25 0.8%
                disputed[21] = Some(1.0);
                disputed[22] = Some(0.8);
                table(
                    topic,
                    &QUARTERS,
                    vec![
                        (
                            "Official_BEA",
                            full(&[
                                -5.3, -28.0, 34.8, 4.0, 6.3, 7.0, 2.3, 6.9, -1.6, -0.6, 3.2, 2.6,
                                2.2, 2.1, 4.9, 3.4, 1.4, 3.0, 2.8, 2.3, -0.5, 3.8, 4.3,
                            ]),
                        ),
                        ("Rosenberg_Adjusted", disputed.to_vec()),
                    ],
                )
            }
            Topic::Sentiment => table(
                topic,
                &SENTIMENT_PERIODS,
                vec![
                    (
                        "Michigan",
                        full(&[
                            91.2, 98.4, 99.3, 99.8, 71.8, 72.5, 80.7, 79.0, 81.2, 70.6, 67.2,
                            50.0, 59.7, 64.9, 71.6, 69.7, 79.0, 66.4, 74.0, 73.2, 52.2, 61.7,
                            52.9,
                        ]),
                    ),
                    (
                        "Conference_Board",
                        full(&[
                            121.7, 135.8, 126.5, 130.4, 85.7, 91.7, 87.1, 87.1, 125.1, 115.2,
                            111.1, 98.7, 109.0, 106.0, 114.0, 108.0, 110.9, 101.9, 104.7, 105.3,
                            86.0, 95.4, 89.1,
                        ]),
                    ),
                ],
            ),
            Topic::Expectations => table(
                topic,
                &MONTHS,
                vec![(
                    "Expectations_Index",
                    full(&[
                        83.8, 79.8, 77.4, 68.8, 72.8, 79.0, 82.0, 82.5, 82.4, 89.1, 86.0, 78.1,
                        76.7, 72.9, 65.2, 54.4, 72.8, 71.5, 73.4, 75.6, 73.7, 70.7, 70.7, 70.7,
                    ]),
                )],
            ),
            Topic::Unemployment => table(
                topic,
                &YEARS,
                vec![
                    ("Overall", full(&[3.5, 8.1, 5.4, 3.6, 3.6, 4.0, 4.6])),
                    ("Young_Grads_22_27", full(&[3.25, 6.5, 5.0, 3.5, 3.8, 4.2, 4.59])),
                    ("Recent_Grads", full(&[5.0, 9.0, 7.5, 5.5, 6.0, 7.5, 9.7])),
                ],
            ),
            Topic::Housing => table(
                topic,
                &YEARS,
                vec![
                    ("Median_Price_K", full(&[313.0, 329.0, 386.0, 449.0, 431.0, 420.0, 417.0])),
                    ("Price_to_Income", full(&[4.1, 4.3, 4.6, 5.2, 5.1, 5.0, 5.0])),
                    ("Cost_Pct_Income", full(&[35.0, 37.0, 40.0, 48.0, 47.0, 47.0, 47.7])),
                    ("First_Time_Buyer_Age", full(&[33.0, 34.0, 36.0, 38.0, 39.0, 39.0, 40.0])),
                ],
            ),
            Topic::Vehicles => table(
                topic,
                &YEARS,
                vec![
                    (
                        "Avg_Transaction_Price",
                        full(&[36718.0, 40107.0, 47000.0, 49929.0, 48528.0, 47500.0, 49814.0]),
                    ),
                    ("Models_Under_25K", full(&[30.0, 25.0, 20.0, 12.0, 10.0, 10.0, 8.0])),
                    (
                        "Avg_Monthly_Payment",
                        full(&[554.0, 575.0, 641.0, 717.0, 726.0, 734.0, 754.0]),
                    ),
                ],
            ),
        }
    }
}

fn full(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Assemble a dataset from label + value columns, rejecting ragged columns
fn table(topic: Topic, labels: &[&str], columns: Vec<Column<'_>>) -> Result<Dataset> {
    let series = columns
        .into_iter()
        .map(|(name, values)| {
            if values.len() != labels.len() {
                return Err(DashboardError::malformed(
                    topic.id(),
                    format!(
                        "column '{}' has {} values for {} labels",
                        name,
                        values.len(),
                        labels.len()
                    ),
                ));
            }
            let observations = labels
                .iter()
                .zip(values.iter())
                .filter_map(|(label, value)| value.map(|v| Observation::new(*label, v)))
                .collect();
            Ok(Series::new(name, observations))
        })
        .collect::<Result<Vec<_>>>()?;

    Dataset::new(topic, series)
}

#[async_trait]
impl DatasetRepository for EmbeddedRepository {
    async fn load_dataset(&self, topic: Topic) -> Result<Dataset> {
        Self::dataset(topic)
    }

    async fn data_status(&self, topic: Topic) -> Result<DataStatus> {
        let dataset = Self::dataset(topic)?;
        Ok(DataStatus {
            topic,
            name: topic.display_name(),
            source: "embedded".to_string(),
            exists: true,
            last_updated: "built-in".to_string(),
            rows: dataset.row_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_a_table() {
        for topic in Topic::ALL {
            let dataset = EmbeddedRepository::dataset(topic).unwrap();
            assert!(dataset.all_series().iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn test_gdp_has_official_and_adjusted_series() {
        let dataset = EmbeddedRepository::dataset(Topic::Gdp).unwrap();
        let official = dataset.series("Official_BEA").unwrap();
        let adjusted = dataset.series("Rosenberg_Adjusted").unwrap();

        assert_eq!(official.len(), 23);
        assert_eq!(official.value_at("Q3 25"), Some(4.3));
        assert_eq!(adjusted.labels(), vec!["Q2 25", "Q3 25"]);
        assert_eq!(adjusted.values(), vec![1.0, 0.8]);
    }

    #[test]
    fn test_ragged_table_is_malformed() {
        let columns = vec![("Median_Price_K", vec![Some(1.0)])];
        let err = table(Topic::Housing, &YEARS, columns).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedData { .. }));
    }

    #[tokio::test]
    async fn test_status_reports_rows() {
        let repo = EmbeddedRepository::new();
        let status = repo.data_status(Topic::Expectations).await.unwrap();
        assert_eq!(status.rows, 24);
        assert_eq!(status.source, "embedded");
    }
}
