use crate::error::{EdaError, Result};
use crate::types::{Feature, Passenger, Port, RawRow};
use crate::util::{non_empty, parse_f64_safe, parse_u32_safe};
use csv::{ReaderBuilder, Trim};
use std::io;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub columns: Vec<String>,
}

pub fn load_passengers(path: &str) -> Result<(Vec<Passenger>, LoadReport)> {
    let rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|source| EdaError::Load {
            path: path.to_string(),
            source,
        })?;
    let out = read_all(rdr)?;
    info!(path, rows = out.1.total_rows, "loaded passenger file");
    Ok(out)
}

/// Same as [`load_passengers`] but from any reader, e.g. an in-memory CSV.
pub fn load_from_reader<R: io::Read>(reader: R) -> Result<(Vec<Passenger>, LoadReport)> {
    let rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    read_all(rdr)
}

fn read_all<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<(Vec<Passenger>, LoadReport)> {
    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let missing: Vec<String> = Feature::REQUIRED
        .iter()
        .map(|f| f.name())
        .filter(|name| !columns.iter().any(|c| c == name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(EdaError::MissingColumns(missing));
    }

    let mut passengers = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        passengers.push(validate_row(idx + 1, row)?);
    }
    debug!(columns = columns.len(), "header accepted");

    let report = LoadReport {
        total_rows: passengers.len(),
        columns,
    };
    Ok((passengers, report))
}

fn required(row: usize, column: &'static str, value: Option<String>) -> Result<String> {
    non_empty(value).ok_or(EdaError::Schema { row, column })
}

fn invalid(row: usize, column: &'static str, value: &str) -> EdaError {
    EdaError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

fn validate_row(row: usize, raw: RawRow) -> Result<Passenger> {
    let survived = required(row, "Survived", raw.survived)?;
    let survived = match parse_u32_safe(Some(&survived)) {
        Some(0) => false,
        Some(1) => true,
        _ => return Err(invalid(row, "Survived", &survived)),
    };

    let pclass = required(row, "Pclass", raw.pclass)?;
    let pclass = match parse_u32_safe(Some(&pclass)) {
        Some(c @ 1..=3) => c as u8,
        _ => return Err(invalid(row, "Pclass", &pclass)),
    };

    let name = required(row, "Name", raw.name)?;
    let sex = required(row, "Sex", raw.sex)?;

    let sib_sp = required(row, "SibSp", raw.sib_sp)?;
    let sib_sp = parse_u32_safe(Some(&sib_sp)).ok_or_else(|| invalid(row, "SibSp", &sib_sp))?;
    let parch = required(row, "Parch", raw.parch)?;
    let parch = parse_u32_safe(Some(&parch)).ok_or_else(|| invalid(row, "Parch", &parch))?;

    let age = optional_non_negative(row, "Age", raw.age)?;
    let fare = optional_non_negative(row, "Fare", raw.fare)?;

    let embarked = match non_empty(raw.embarked) {
        Some(code) => Some(Port::parse(&code).ok_or_else(|| invalid(row, "Embarked", &code))?),
        None => None,
    };

    let passenger_id = match non_empty(raw.passenger_id) {
        Some(id) => Some(parse_u32_safe(Some(&id)).ok_or_else(|| invalid(row, "PassengerId", &id))?),
        None => None,
    };

    Ok(Passenger {
        passenger_id,
        survived,
        pclass,
        name,
        sex,
        age,
        sib_sp,
        parch,
        ticket: non_empty(raw.ticket),
        fare,
        cabin: non_empty(raw.cabin),
        embarked,
        title: None,
        family_size: None,
        is_alone: None,
    })
}

/// Non-numeric text (`NaN`, `unknown`) counts as missing and is left for
/// imputation; only a negative number is rejected.
fn optional_non_negative(
    row: usize,
    column: &'static str,
    value: Option<String>,
) -> Result<Option<f64>> {
    let Some(text) = non_empty(value) else {
        return Ok(None);
    };
    match parse_f64_safe(Some(&text)) {
        Some(v) if v >= 0.0 => Ok(Some(v)),
        Some(_) => Err(invalid(row, column, &text)),
        None => {
            debug!(row, column, value = %text, "non-numeric value treated as missing");
            Ok(None)
        }
    }
}
