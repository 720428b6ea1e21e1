//! Imputation and feature derivation, applied in place.
//!
//! After [`preprocess`] every passenger has an `Age`, an `Embarked` port, a
//! `Title`, a `FamilySize` and an `IsAlone` flag. Running it again is a no-op.

use crate::types::{Passenger, Port, Title};
use crate::util::median;
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

/// Which ages feed the median used to fill a missing `Age`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum ImputationPolicy {
    /// One median over the ages present before anything is filled.
    #[default]
    Snapshot,
    /// Median recomputed at each gap over the ages present at that moment,
    /// including values filled earlier in the same pass.
    Live,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreprocessReport {
    pub imputed_age: usize,
    pub imputed_embarked: usize,
    /// Names without a `", "` separator, whose title fell back to `Other`.
    pub untitled_names: usize,
    /// The snapshot median; `None` under the live policy or with no gaps.
    pub age_fill: Option<f64>,
}

pub const DEFAULT_PORT: Port = Port::S;

pub fn preprocess(passengers: &mut [Passenger], policy: ImputationPolicy) -> PreprocessReport {
    let mut report = PreprocessReport::default();

    let snapshot = match policy {
        ImputationPolicy::Snapshot if passengers.iter().any(|p| p.age.is_none()) => {
            Some(median(present_ages(passengers)))
        }
        _ => None,
    };
    report.age_fill = snapshot;

    for i in 0..passengers.len() {
        if passengers[i].age.is_none() {
            let fill = match snapshot {
                Some(v) => v,
                None => median(present_ages(passengers)),
            };
            passengers[i].age = Some(fill);
            report.imputed_age += 1;
        }

        let p = &mut passengers[i];
        if p.embarked.is_none() {
            p.embarked = Some(DEFAULT_PORT);
            report.imputed_embarked += 1;
        }

        let (title, titled) = derive_title(&p.name);
        if !titled {
            report.untitled_names += 1;
        }
        p.title = Some(title);

        let family_size = p.sib_sp + p.parch + 1;
        p.family_size = Some(family_size);
        p.is_alone = Some(family_size == 1);
    }

    info!(
        ?policy,
        imputed_age = report.imputed_age,
        imputed_embarked = report.imputed_embarked,
        untitled = report.untitled_names,
        "preprocessing complete"
    );
    report
}

fn present_ages(passengers: &[Passenger]) -> Vec<f64> {
    passengers
        .iter()
        .filter_map(|p| p.age.filter(|a| a.is_finite()))
        .collect()
}

/// Title from a `"Surname, Title. Given"` name, and whether a separator was
/// found at all.
pub fn derive_title(name: &str) -> (Title, bool) {
    match name.split(", ").nth(1) {
        Some(rest) => {
            let raw = rest.split(". ").next().unwrap_or_default();
            let title = Title::normalize(raw);
            if title == Title::Other {
                debug!(raw, "uncommon title folded into Other");
            }
            (title, true)
        }
        None => (Title::Other, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(name: &str, age: Option<f64>, sib_sp: u32, parch: u32) -> Passenger {
        Passenger {
            passenger_id: None,
            survived: false,
            pclass: 3,
            name: name.to_string(),
            sex: "male".to_string(),
            age,
            sib_sp,
            parch,
            ticket: None,
            fare: Some(7.25),
            cabin: None,
            embarked: None,
            title: None,
            family_size: None,
            is_alone: None,
        }
    }

    #[test]
    fn titles_are_normalized() {
        assert_eq!(derive_title("Smith, Mrs. Jane"), (Title::Mrs, true));
        assert_eq!(derive_title("Palsson, Master. Gosta Leonard"), (Title::Master, true));
        assert_eq!(derive_title("Uruchurtu, Don. Manuel E"), (Title::Other, true));
        assert_eq!(derive_title("Rothes, the Countess. of"), (Title::Other, true));
        assert_eq!(derive_title("NoComma"), (Title::Other, false));
    }

    #[test]
    fn derived_fields_follow_family_counts() {
        let mut data = vec![
            passenger("A, Mr. B", Some(30.0), 0, 0),
            passenger("C, Mrs. D", Some(40.0), 1, 2),
        ];
        preprocess(&mut data, ImputationPolicy::Snapshot);
        assert_eq!(data[0].family_size, Some(1));
        assert_eq!(data[0].is_alone, Some(true));
        assert_eq!(data[1].family_size, Some(4));
        assert_eq!(data[1].is_alone, Some(false));
        assert!(data.iter().all(|p| p.embarked == Some(Port::S)));
    }

    #[test]
    fn snapshot_fills_every_gap_with_the_same_median() {
        let mut data = vec![
            passenger("A, Mr. B", None, 0, 0),
            passenger("C, Mr. D", Some(10.0), 0, 0),
            passenger("E, Mr. F", None, 0, 0),
            passenger("G, Mr. H", Some(20.0), 0, 0),
            passenger("I, Mr. J", Some(60.0), 0, 0),
        ];
        let report = preprocess(&mut data, ImputationPolicy::Snapshot);
        assert_eq!(report.imputed_age, 2);
        assert_eq!(report.age_fill, Some(20.0));
        assert_eq!(data[0].age, Some(20.0));
        assert_eq!(data[2].age, Some(20.0));
    }

    #[test]
    fn live_policy_sees_earlier_fills() {
        let mut data = vec![
            passenger("A, Mr. B", Some(10.0), 0, 0),
            passenger("C, Mr. D", None, 0, 0),
            passenger("E, Mr. F", None, 0, 0),
            passenger("G, Mr. H", Some(20.0), 0, 0),
            passenger("I, Mr. J", Some(60.0), 0, 0),
            passenger("K, Mr. L", Some(70.0), 0, 0),
        ];
        preprocess(&mut data, ImputationPolicy::Live);
        // First gap: median(10, 20, 60, 70) = 40.
        assert_eq!(data[1].age, Some(40.0));
        // Second gap now also counts the 40: median(10, 20, 40, 60, 70) = 40.
        assert_eq!(data[2].age, Some(40.0));

        let mut snap = data.clone();
        snap[1].age = None;
        snap[2].age = None;
        let report = preprocess(&mut snap, ImputationPolicy::Live);
        assert_eq!(report.age_fill, None);
    }

    #[test]
    fn running_twice_changes_nothing() {
        for policy in [ImputationPolicy::Snapshot, ImputationPolicy::Live] {
            let mut data = vec![
                passenger("A, Mr. B", None, 1, 0),
                passenger("C, Miss. D", Some(5.0), 0, 2),
                passenger("Lonely", Some(50.0), 0, 0),
            ];
            preprocess(&mut data, policy);
            let once = data.clone();
            let second = preprocess(&mut data, policy);
            assert_eq!(data, once);
            assert_eq!(second.imputed_age, 0);
            assert_eq!(second.imputed_embarked, 0);
        }
    }

    #[test]
    fn all_ages_missing_falls_back_to_zero() {
        let mut data = vec![passenger("A, Mr. B", None, 0, 0)];
        preprocess(&mut data, ImputationPolicy::Snapshot);
        assert_eq!(data[0].age, Some(0.0));
    }
}
