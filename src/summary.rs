use crate::types::{Feature, Passenger};
use crate::util::{average, median, min_max, percentage};
use serde::Serialize;
use tracing::warn;

pub const STATS_FEATURES: [Feature; 5] = [
    Feature::Age,
    Feature::SibSp,
    Feature::Parch,
    Feature::Fare,
    Feature::FamilySize,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total: usize,
    pub survived: usize,
    pub perished: usize,
    /// `None` for an empty dataset.
    pub survived_pct: Option<f64>,
    pub perished_pct: Option<f64>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValues {
    pub feature: Feature,
    pub missing: usize,
    pub pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStats {
    pub feature: Feature,
    /// `None` when the feature has no numeric values at all.
    pub stats: Option<NumericStats>,
}

pub fn overview(data: &[Passenger]) -> Overview {
    let total = data.len();
    let survived = data.iter().filter(|p| p.survived).count();
    let survived_pct = percentage(survived, total);
    Overview {
        total,
        survived,
        perished: total - survived,
        survived_pct,
        perished_pct: survived_pct.map(|s| 100.0 - s),
        features: Feature::ALL.to_vec(),
    }
}

pub fn missing_values(data: &[Passenger]) -> Vec<MissingValues> {
    Feature::ALL
        .iter()
        .map(|&feature| {
            let missing = data.iter().filter(|p| p.is_missing(feature)).count();
            MissingValues {
                feature,
                missing,
                pct: percentage(missing, data.len()),
            }
        })
        .collect()
}

pub fn numeric_stats(values: &[f64]) -> Option<NumericStats> {
    let mean = average(values)?;
    let (min, max) = min_max(values)?;
    Some(NumericStats {
        mean,
        median: median(values.to_vec()),
        min,
        max,
    })
}

pub fn stats_table(data: &[Passenger]) -> Vec<FeatureStats> {
    STATS_FEATURES
        .iter()
        .map(|&feature| {
            let values: Vec<f64> = data.iter().filter_map(|p| p.numeric(feature)).collect();
            let stats = numeric_stats(&values);
            if stats.is_none() {
                warn!(%feature, "no numeric values; reporting no data");
            }
            FeatureStats { feature, stats }
        })
        .collect()
}
