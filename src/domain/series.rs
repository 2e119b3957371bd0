// Series domain model
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub label: String,
    pub value: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Named, ordered sequence of (category label, value) pairs.
///
/// Read-only once constructed; gaps in the source table are simply absent
/// observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    name: String,
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            name: name.into(),
            observations,
        }
    }

    pub fn from_pairs<L: Into<String>>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (L, f64)>,
    ) -> Self {
        let observations = pairs
            .into_iter()
            .map(|(label, value)| Observation::new(label, value))
            .collect();
        Self::new(name, observations)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.observations.iter().map(|o| o.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn value_at(&self, label: &str) -> Option<f64> {
        self.position(label).map(|idx| self.observations[idx].value)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.observations.iter().position(|o| o.label == label)
    }

    /// Inclusive slice between two labels, `None` if either label is absent
    /// or `from` comes after `to`
    pub fn between(&self, from: &str, to: &str) -> Option<&[Observation]> {
        let start = self.position(from)?;
        let end = self.position(to)?;
        if start > end {
            return None;
        }
        Some(&self.observations[start..=end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gdp() -> Series {
        Series::from_pairs(
            "Official_BEA",
            [("Q1 25", -0.5), ("Q2 25", 3.8), ("Q3 25", 4.3)],
        )
    }

    #[test]
    fn test_between_is_inclusive() {
        let series = gdp();
        let slice = series.between("Q2 25", "Q3 25").unwrap();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[0].value, 3.8);
        assert_eq!(slice[1].label, "Q3 25");
    }

    #[test]
    fn test_between_rejects_unknown_or_reversed_labels() {
        let series = gdp();
        assert!(series.between("Q4 25", "Q3 25").is_none());
        assert!(series.between("Q3 25", "Q1 25").is_none());
    }

    #[test]
    fn test_value_lookup() {
        let series = gdp();
        assert_eq!(series.value_at("Q1 25"), Some(-0.5));
        assert_eq!(series.value_at("Q1 19"), None);
        assert_eq!(series.labels(), vec!["Q1 25", "Q2 25", "Q3 25"]);
    }
}
