// Dataset domain model - one economic topic, many series
use super::error::{DashboardError, Result};
use super::series::Series;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Gdp,
    Sentiment,
    Expectations,
    Unemployment,
    Housing,
    Vehicles,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Gdp,
        Topic::Sentiment,
        Topic::Expectations,
        Topic::Unemployment,
        Topic::Housing,
        Topic::Vehicles,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Topic::Gdp => "gdp",
            Topic::Sentiment => "sentiment",
            Topic::Expectations => "expectations",
            Topic::Unemployment => "unemployment",
            Topic::Housing => "housing",
            Topic::Vehicles => "vehicles",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Gdp => "GDP",
            Topic::Sentiment => "Sentiment",
            Topic::Expectations => "Expectations",
            Topic::Unemployment => "Unemployment",
            Topic::Housing => "Housing",
            Topic::Vehicles => "Vehicle",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_data.csv", self.id())
    }

    /// Maps a table column header onto the canonical series name.
    /// Headers that are already canonical (or unknown) pass through.
    pub fn canonical_series_name<'a>(&self, column: &'a str) -> &'a str {
        let aliases: &[(&str, &str)] = match self {
            Topic::Gdp => &[("GDP", "Official_BEA"), ("Disputed", "Rosenberg_Adjusted")],
            Topic::Sentiment => &[("Conference Board", "Conference_Board")],
            Topic::Expectations => &[("Value", "Expectations_Index")],
            Topic::Unemployment => &[
                ("Young Grads (22-27)", "Young_Grads_22_27"),
                ("Recent Grads", "Recent_Grads"),
            ],
            Topic::Housing => &[
                ("Median Price ($K)", "Median_Price_K"),
                ("Price-to-Income Ratio", "Price_to_Income"),
                ("Cost as % of Income", "Cost_Pct_Income"),
                ("First-Time Buyer Age", "First_Time_Buyer_Age"),
            ],
            Topic::Vehicles => &[
                ("Avg Transaction Price", "Avg_Transaction_Price"),
                ("Models Under $25K", "Models_Under_25K"),
                ("Avg Monthly Payment", "Avg_Monthly_Payment"),
            ],
        };

        aliases
            .iter()
            .find(|(header, _)| *header == column)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(column)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Topic {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Topic::ALL
            .into_iter()
            .find(|t| {
                t.id().eq_ignore_ascii_case(needle) || t.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DashboardError::missing(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    topic: Topic,
    series: Vec<Series>,
}

impl Dataset {
    /// Fails with `MalformedData` on duplicate series names or an empty dataset
    pub fn new(topic: Topic, series: Vec<Series>) -> Result<Self> {
        if series.is_empty() {
            return Err(DashboardError::malformed(topic.id(), "dataset has no series"));
        }

        let mut seen = HashSet::new();
        for s in &series {
            if !seen.insert(s.name()) {
                return Err(DashboardError::malformed(
                    topic.id(),
                    format!("duplicate series '{}'", s.name()),
                ));
            }
        }

        Ok(Self { topic, series })
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn all_series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name()).collect()
    }

    /// Number of distinct labels across all series
    pub fn row_count(&self) -> usize {
        let labels: HashSet<&str> = self
            .series
            .iter()
            .flat_map(|s| s.observations().iter().map(|o| o.label.as_str()))
            .collect();
        labels.len()
    }
}
