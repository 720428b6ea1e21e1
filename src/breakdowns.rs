// Per-group outcome counts behind the class, gender, age and port views.
use crate::types::{Passenger, Port};
use crate::util::{min_max, percentage};
use serde::Serialize;

pub const AGE_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeCount {
    pub group: String,
    pub survived: usize,
    pub perished: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortRate {
    pub port: Port,
    pub passengers: usize,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdowns {
    pub by_class: Vec<OutcomeCount>,
    pub by_sex: Vec<OutcomeCount>,
    pub age_histogram: Vec<OutcomeCount>,
    pub by_port: Vec<PortRate>,
}

pub fn breakdowns(data: &[Passenger]) -> Breakdowns {
    Breakdowns {
        by_class: by_class(data),
        by_sex: by_sex(data),
        age_histogram: age_histogram(data, AGE_BINS),
        by_port: by_port(data),
    }
}

fn count<'a>(group: String, members: impl Iterator<Item = &'a Passenger>) -> OutcomeCount {
    let (mut survived, mut perished) = (0, 0);
    for p in members {
        if p.survived {
            survived += 1;
        } else {
            perished += 1;
        }
    }
    OutcomeCount {
        group,
        survived,
        perished,
    }
}

pub fn by_class(data: &[Passenger]) -> Vec<OutcomeCount> {
    [(1u8, "1st Class"), (2, "2nd Class"), (3, "3rd Class")]
        .iter()
        .map(|(class, label)| {
            count(
                label.to_string(),
                data.iter().filter(|p| p.pclass == *class),
            )
        })
        .collect()
}

pub fn by_sex(data: &[Passenger]) -> Vec<OutcomeCount> {
    [("female", "Female"), ("male", "Male")]
        .iter()
        .map(|(sex, label)| count(label.to_string(), data.iter().filter(|p| p.sex == *sex)))
        .collect()
}

/// Equal-width bins over the full age range. The top value lands in the last
/// bin; a zero-width range puts every age in the first.
pub fn age_histogram(data: &[Passenger], bins: usize) -> Vec<OutcomeCount> {
    let ages: Vec<f64> = data.iter().filter_map(|p| p.age).collect();
    let Some((lo, hi)) = min_max(&ages) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let step = (hi - lo) / bins as f64;

    let mut out: Vec<OutcomeCount> = (0..bins)
        .map(|i| OutcomeCount {
            group: format!(
                "{:.1}-{:.1}",
                lo + i as f64 * step,
                lo + (i + 1) as f64 * step
            ),
            survived: 0,
            perished: 0,
        })
        .collect();

    for p in data {
        let Some(age) = p.age else { continue };
        let idx = if step > 0.0 {
            (((age - lo) / step).floor() as usize).min(bins - 1)
        } else {
            0
        };
        if p.survived {
            out[idx].survived += 1;
        } else {
            out[idx].perished += 1;
        }
    }
    out
}

pub fn by_port(data: &[Passenger]) -> Vec<PortRate> {
    Port::ALL
        .iter()
        .map(|&port| {
            let members: Vec<&Passenger> =
                data.iter().filter(|p| p.embarked == Some(port)).collect();
            let survived = members.iter().filter(|p| p.survived).count();
            PortRate {
                port,
                passengers: members.len(),
                rate: percentage(survived, members.len()),
            }
        })
        .collect()
}
