use crate::importance::CategoricalResult;
use crate::types::Feature;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFinding {
    pub factor: String,
    pub impact: f64,
    pub detail: String,
}

/// Picks the factor with the widest survival-rate spread.
///
/// Candidates are evaluated gender first, then passenger class; a later
/// candidate only wins on a strictly larger impact. Returns `None` when no
/// candidate exceeds 0.
pub fn most_important_factor(categorical: &[CategoricalResult]) -> Option<KeyFinding> {
    let mut best: Option<KeyFinding> = None;
    let mut max_impact = 0.0;

    let candidates = [gender_candidate(categorical), class_candidate(categorical)];
    for candidate in candidates.into_iter().flatten() {
        if candidate.impact > max_impact {
            max_impact = candidate.impact;
            best = Some(candidate);
        }
    }
    best
}

fn find(categorical: &[CategoricalResult], feature: Feature) -> Option<&CategoricalResult> {
    categorical.iter().find(|r| r.feature == feature)
}

fn gender_candidate(categorical: &[CategoricalResult]) -> Option<KeyFinding> {
    let sex = find(categorical, Feature::Sex)?;
    let female = sex.get("female")?.rate;
    let male = sex.get("male")?.rate;
    Some(KeyFinding {
        factor: "Gender".to_string(),
        impact: (male - female).abs(),
        detail: format!("Female: {:.2}%, Male: {:.2}%", female, male),
    })
}

fn class_candidate(categorical: &[CategoricalResult]) -> Option<KeyFinding> {
    let pclass = find(categorical, Feature::Pclass)?;
    let highest = pclass
        .categories
        .iter()
        .max_by(|a, b| a.rate.total_cmp(&b.rate))?;
    let lowest = pclass
        .categories
        .iter()
        .min_by(|a, b| a.rate.total_cmp(&b.rate))?;
    Some(KeyFinding {
        factor: "Passenger Class".to_string(),
        impact: highest.rate - lowest.rate,
        detail: format!(
            "{} class: {:.2}%, {} class: {:.2}%",
            ordinal(&highest.category),
            highest.rate,
            ordinal(&lowest.category),
            lowest.rate
        ),
    })
}

fn ordinal(class: &str) -> String {
    match class {
        "1" => "1st".to_string(),
        "2" => "2nd".to_string(),
        "3" => "3rd".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importance::CategoryRate;

    fn result(feature: Feature, rates: &[(&str, f64)]) -> CategoricalResult {
        CategoricalResult {
            feature,
            categories: rates
                .iter()
                .map(|(c, r)| CategoryRate {
                    category: c.to_string(),
                    rate: *r,
                    total: 10,
                })
                .collect(),
        }
    }

    #[test]
    fn gender_wins_with_larger_gap() {
        let cat = vec![
            result(Feature::Pclass, &[("3", 24.24), ("1", 62.96), ("2", 47.28)]),
            result(Feature::Sex, &[("male", 18.89), ("female", 74.20)]),
        ];
        let finding = most_important_factor(&cat).unwrap();
        assert_eq!(finding.factor, "Gender");
        assert_eq!(finding.detail, "Female: 74.20%, Male: 18.89%");
    }

    #[test]
    fn class_wins_only_on_strict_improvement() {
        let cat = vec![
            result(Feature::Sex, &[("male", 20.0), ("female", 60.0)]),
            result(Feature::Pclass, &[("1", 70.0), ("2", 50.0), ("3", 30.0)]),
        ];
        // Tie at 40: gender keeps the slot.
        assert_eq!(most_important_factor(&cat).unwrap().factor, "Gender");

        let cat = vec![
            result(Feature::Sex, &[("male", 20.0), ("female", 60.0)]),
            result(Feature::Pclass, &[("2", 50.0), ("1", 75.0), ("3", 30.0)]),
        ];
        let finding = most_important_factor(&cat).unwrap();
        assert_eq!(finding.factor, "Passenger Class");
        assert_eq!(finding.detail, "1st class: 75.00%, 3rd class: 30.00%");
        assert!((finding.impact - 45.0).abs() < 1e-9);
    }

    #[test]
    fn no_spread_means_no_finding() {
        let cat = vec![
            result(Feature::Sex, &[("male", 50.0), ("female", 50.0)]),
            result(Feature::Pclass, &[("1", 50.0)]),
        ];
        assert_eq!(most_important_factor(&cat), None);
        assert_eq!(most_important_factor(&[]), None);
    }

    #[test]
    fn one_sex_only_skips_gender() {
        let cat = vec![
            result(Feature::Sex, &[("male", 10.0)]),
            result(Feature::Pclass, &[("1", 40.0), ("3", 10.0)]),
        ];
        assert_eq!(most_important_factor(&cat).unwrap().factor, "Passenger Class");
    }
}
