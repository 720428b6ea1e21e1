// Turns an `Analysis` into display rows for the console and CSV exports.
use chrono::{DateTime, Utc};
use serde::Serialize;
use titanic_eda::types::{
    CategoryRateRow, CorrelationRow, FeatureImpactRow, MissingValueRow, NumericShiftRow,
    OutcomeCountRow, PortRateRow, StatsRow,
};
use titanic_eda::util::{format_number, format_opt, format_pct};
use titanic_eda::breakdowns::OutcomeCount;
use titanic_eda::{Analysis, ImputationPolicy};

const NO_DATA: &str = "no data";

pub fn missing_value_rows(a: &Analysis) -> Vec<MissingValueRow> {
    a.missing_values
        .iter()
        .map(|m| MissingValueRow {
            feature: m.feature.to_string(),
            missing: m.missing,
            percentage: format_pct(m.pct),
        })
        .collect()
}

pub fn stats_rows(a: &Analysis) -> Vec<StatsRow> {
    a.stats
        .iter()
        .map(|s| {
            let cell = |f: fn(&titanic_eda::summary::NumericStats) -> f64| {
                format_opt(s.stats.as_ref().map(f), 2, NO_DATA)
            };
            StatsRow {
                feature: s.feature.to_string(),
                mean: cell(|n| n.mean),
                median: cell(|n| n.median),
                min: cell(|n| n.min),
                max: cell(|n| n.max),
            }
        })
        .collect()
}

pub fn category_rows(a: &Analysis) -> Vec<CategoryRateRow> {
    a.categorical
        .iter()
        .flat_map(|r| {
            r.categories.iter().map(move |c| CategoryRateRow {
                feature: r.feature.to_string(),
                category: c.category.clone(),
                total: c.total,
                rate: format_pct(Some(c.rate)),
            })
        })
        .collect()
}

pub fn impact_rows(a: &Analysis) -> Vec<FeatureImpactRow> {
    a.categorical
        .iter()
        .map(|r| FeatureImpactRow {
            feature: r.feature.to_string(),
            rate_range: format_opt(r.rate_spread(), 2, NO_DATA),
        })
        .collect()
}

pub fn numeric_shift_rows(a: &Analysis) -> Vec<NumericShiftRow> {
    a.numeric
        .iter()
        .map(|n| NumericShiftRow {
            feature: n.feature.to_string(),
            survived_mean: format_opt(n.survived_mean(), 2, NO_DATA),
            overall_mean: format_opt(n.overall_mean(), 2, NO_DATA),
            difference: format_opt(n.mean_shift(), 2, NO_DATA),
        })
        .collect()
}

pub fn correlation_rows(a: &Analysis) -> Vec<CorrelationRow> {
    a.correlations
        .iter()
        .map(|c| CorrelationRow {
            feature: c.feature.to_string(),
            coefficient: format_number(c.coefficient, 4),
            samples: c.samples,
            note: if c.degenerate {
                "undefined (no variance)".to_string()
            } else if c.coefficient > 0.0 {
                "positive".to_string()
            } else if c.coefficient < 0.0 {
                "negative".to_string()
            } else {
                "none".to_string()
            },
        })
        .collect()
}

fn outcome_rows(counts: &[OutcomeCount]) -> Vec<OutcomeCountRow> {
    counts
        .iter()
        .map(|c| OutcomeCountRow {
            group: c.group.clone(),
            survived: c.survived,
            perished: c.perished,
        })
        .collect()
}

pub fn class_rows(a: &Analysis) -> Vec<OutcomeCountRow> {
    outcome_rows(&a.breakdowns.by_class)
}

pub fn gender_rows(a: &Analysis) -> Vec<OutcomeCountRow> {
    outcome_rows(&a.breakdowns.by_sex)
}

pub fn age_rows(a: &Analysis) -> Vec<OutcomeCountRow> {
    outcome_rows(&a.breakdowns.age_histogram)
}

pub fn port_rows(a: &Analysis) -> Vec<PortRateRow> {
    a.breakdowns
        .by_port
        .iter()
        .map(|p| PortRateRow {
            port: p.port.town().to_string(),
            passengers: p.passengers,
            rate: format_pct(p.rate),
        })
        .collect()
}

/// The sentence shown under "Key finding".
pub fn key_finding_text(a: &Analysis) -> String {
    match &a.key_finding {
        Some(k) => format!(
            "The most important factor contributing to passenger death was {}.\n{}",
            k.factor, k.detail
        ),
        None => "No single factor stands out: neither gender nor passenger class \
                 shows any difference in survival rate."
            .to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub source: &'a str,
    pub generated_at: DateTime<Utc>,
    pub imputation: ImputationPolicy,
    #[serde(flatten)]
    pub analysis: &'a Analysis,
}

pub fn generate_summary<'a>(
    source: &'a str,
    imputation: ImputationPolicy,
    analysis: &'a Analysis,
) -> Summary<'a> {
    Summary {
        source,
        generated_at: Utc::now(),
        imputation,
        analysis,
    }
}
