use crate::breakdowns::{breakdowns, Breakdowns};
use crate::decision::{most_important_factor, KeyFinding};
use crate::importance::{
    categorical_rates, correlations, numeric_series, CategoricalResult, Correlation, NumericSeries,
};
use crate::preprocess::{preprocess, ImputationPolicy, PreprocessReport};
use crate::summary::{missing_values, overview, stats_table, FeatureStats, MissingValues, Overview};
use crate::types::Passenger;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub imputation: ImputationPolicy,
}

/// Everything one analysis run produces. Owned by the caller, recomputed on
/// every run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub preprocess: PreprocessReport,
    pub overview: Overview,
    pub missing_values: Vec<MissingValues>,
    pub stats: Vec<FeatureStats>,
    pub categorical: Vec<CategoricalResult>,
    pub numeric: Vec<NumericSeries>,
    pub correlations: Vec<Correlation>,
    pub breakdowns: Breakdowns,
    pub key_finding: Option<KeyFinding>,
}

/// Preprocesses `data` in place, then computes every summary over it.
pub fn analyze(data: &mut [Passenger], config: &AnalysisConfig) -> Analysis {
    if data.is_empty() {
        warn!("dataset is empty; every statistic will report no data");
    }
    let preprocess = preprocess(data, config.imputation);
    let data: &[Passenger] = data;

    let categorical = categorical_rates(data);
    let key_finding = most_important_factor(&categorical);
    match &key_finding {
        Some(k) => info!(factor = %k.factor, impact = k.impact, "key factor selected"),
        None => warn!("no factor shows any survival-rate spread"),
    }

    Analysis {
        preprocess,
        overview: overview(data),
        missing_values: missing_values(data),
        stats: stats_table(data),
        categorical,
        numeric: numeric_series(data),
        correlations: correlations(data),
        breakdowns: breakdowns(data),
        key_finding,
    }
}
