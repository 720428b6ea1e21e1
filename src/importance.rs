//! Association between each feature and survival.
//!
//! Three independent passes: outcome rate per category, survivor vs. overall
//! value series per numeric feature, and Pearson correlation against the 0/1
//! outcome.

use crate::types::{Feature, Passenger};
use crate::util::{average, min_max, percentage};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

pub const CATEGORICAL_FEATURES: [Feature; 5] = [
    Feature::Pclass,
    Feature::Sex,
    Feature::Embarked,
    Feature::Title,
    Feature::IsAlone,
];

pub const NUMERIC_FEATURES: [Feature; 5] = [
    Feature::Age,
    Feature::Fare,
    Feature::FamilySize,
    Feature::SibSp,
    Feature::Parch,
];

pub const CORRELATION_FEATURES: [Feature; 5] = [
    Feature::Age,
    Feature::Fare,
    Feature::SibSp,
    Feature::Parch,
    Feature::FamilySize,
];

/// Label used for passengers with no value in a categorical feature.
pub const MISSING_CATEGORY: &str = "<missing>";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRate {
    pub category: String,
    /// Percentage of the category with `Survived == 1`.
    pub rate: f64,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalResult {
    pub feature: Feature,
    /// In first-occurrence order.
    pub categories: Vec<CategoryRate>,
}

impl CategoricalResult {
    pub fn get(&self, category: &str) -> Option<&CategoryRate> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Max rate minus min rate; `None` with no categories.
    pub fn rate_spread(&self) -> Option<f64> {
        let rates: Vec<f64> = self.categories.iter().map(|c| c.rate).collect();
        min_max(&rates).map(|(lo, hi)| hi - lo)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSeries {
    pub feature: Feature,
    pub survived_values: Vec<Option<f64>>,
    pub all_values: Vec<Option<f64>>,
}

impl NumericSeries {
    pub fn survived_mean(&self) -> Option<f64> {
        mean_present(&self.survived_values)
    }

    pub fn overall_mean(&self) -> Option<f64> {
        mean_present(&self.all_values)
    }

    /// |mean(survivors) - mean(all)|, missing values skipped.
    pub fn mean_shift(&self) -> Option<f64> {
        Some((self.survived_mean()? - self.overall_mean()?).abs())
    }
}

fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    average(&present)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub feature: Feature,
    pub coefficient: f64,
    /// Passengers with a value for the feature.
    pub samples: usize,
    /// No data or zero variance on either side; `coefficient` is then 0.
    pub degenerate: bool,
}

pub fn categorical_rates(data: &[Passenger]) -> Vec<CategoricalResult> {
    CATEGORICAL_FEATURES
        .iter()
        .map(|&feature| categorical_rate(data, feature))
        .collect()
}

pub fn categorical_rate(data: &[Passenger], feature: Feature) -> CategoricalResult {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize, usize)> = Vec::new();
    for p in data {
        let label = p
            .category(feature)
            .unwrap_or_else(|| MISSING_CATEGORY.to_string());
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            counts.push((label, 0, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
        if p.survived {
            counts[slot].2 += 1;
        }
    }
    let categories = counts
        .into_iter()
        .map(|(category, total, survived)| CategoryRate {
            category,
            rate: percentage(survived, total).unwrap_or(0.0),
            total,
        })
        .collect();
    CategoricalResult {
        feature,
        categories,
    }
}

pub fn numeric_series(data: &[Passenger]) -> Vec<NumericSeries> {
    NUMERIC_FEATURES
        .iter()
        .map(|&feature| NumericSeries {
            feature,
            survived_values: data
                .iter()
                .filter(|p| p.survived)
                .map(|p| p.numeric(feature))
                .collect(),
            all_values: data.iter().map(|p| p.numeric(feature)).collect(),
        })
        .collect()
}

pub fn correlations(data: &[Passenger]) -> Vec<Correlation> {
    CORRELATION_FEATURES
        .iter()
        .map(|&feature| {
            let (x, y): (Vec<f64>, Vec<f64>) = data
                .iter()
                .filter_map(|p| Some((p.numeric(feature)?, if p.survived { 1.0 } else { 0.0 })))
                .unzip();
            let (coefficient, degenerate) = match pearson(&x, &y) {
                Some(r) => (r, false),
                None => {
                    warn!(%feature, samples = x.len(), "correlation undefined; using 0");
                    (0.0, true)
                }
            };
            Correlation {
                feature,
                coefficient,
                samples: x.len(),
                degenerate,
            }
        })
        .collect()
}

/// Pearson's r, or `None` when either side has zero variance (or no data).
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    // Decided on the values, not on the sums: rounding in the mean leaves a
    // tiny non-zero spread for a constant series.
    if is_constant(x) || is_constant(y) {
        return None;
    }
    let x_mean = average(x)?;
    let y_mean = average(y)?;
    let (mut num, mut dx, mut dy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let (a, b) = (xi - x_mean, yi - y_mean);
        num += a * b;
        dx += a * a;
        dy += b * b;
    }
    if dx == 0.0 || dy == 0.0 {
        return None;
    }
    Some(num / (dx * dy).sqrt())
}

fn is_constant(v: &[f64]) -> bool {
    v.iter().all(|e| *e == v[0])
}

/// Same as [`pearson`] with degenerate input mapped to 0.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    pearson(x, y).unwrap_or(0.0)
}
