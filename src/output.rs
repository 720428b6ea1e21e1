use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use titanic_eda::{EdaError, Result};

fn export_err(path: &Path, e: impl std::fmt::Display) -> EdaError {
    EdaError::Export {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| export_err(path, e))?;
    for r in rows {
        wtr.serialize(r).map_err(|e| export_err(path, e))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(|e| export_err(path, e))?;
    Ok(())
}

/// Prints a section heading followed by the first `max_rows` rows.
pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
    if rows.len() > max_rows {
        println!("... {} more row(s)\n", rows.len() - max_rows);
    }
}
