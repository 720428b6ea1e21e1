// Parsing and small statistics helpers.
//
// CSV cells arrive as optional strings; everything here turns them into
// typed values or `None` so the pipeline never sees NaN or Infinity.
use num_format::{Locale, ToFormattedString};

/// Parse a cell into `f64`, forgiving about the usual CSV noise.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (this also rejects
///   `NaN` and `inf`).
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    // Loaders with dynamic typing write integer columns as `1.0` at times.
    match s.parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            let f = parse_f64_safe(Some(s))?;
            if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
                Some(f as u32)
            } else {
                None
            }
        }
    }
}

/// Trimmed, non-empty text or `None`.
pub fn non_empty(s: Option<String>) -> Option<String> {
    let s = s?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn average(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    let sum: f64 = v.iter().copied().sum();
    Some(sum / v.len() as f64)
}

/// Median with the even-length midpoint convention; 0 for an empty input.
///
/// Takes the `Vec` by value so it can sort in place without a clone at the
/// call site.
pub fn median(mut v: Vec<f64>) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.sort_by(|a, b| a.total_cmp(b));
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        (v[mid - 1] + v[mid]) / 2.0
    }
}

pub fn min_max(v: &[f64]) -> Option<(f64, f64)> {
    let first = *v.first()?;
    Some(
        v.iter()
            .fold((first, first), |(lo, hi), x| (lo.min(*x), hi.max(*x))),
    )
}

/// Share of `part` in `whole` as a percentage, `None` when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale thousands separators, e.g. `1,234,567.89`.
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Past i64 range the digits are printed without separators.
    let mut res = match int_part.parse::<i64>() {
        Ok(int_val) => int_val.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    // `-0.00` reads badly in a table.
    if neg && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_opt(n: Option<f64>, decimals: usize, missing: &str) -> String {
    match n {
        Some(v) => format_number(v, decimals),
        None => missing.to_string(),
    }
}

pub fn format_pct(n: Option<f64>) -> String {
    match n {
        Some(v) => format!("{}%", format_number(v, 2)),
        None => "n/a".to_string(),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages, e.g. `9,855 rows loaded`.
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_follows_midpoint_convention() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![5.0]), 5.0);
        assert_eq!(median(vec![1.0, 3.0]), 2.0);
        assert_eq!(median(vec![1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn median_ignores_input_order() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), median(vec![1.0, 2.0, 3.0]));
        assert_eq!(median(vec![30.0, 22.0, 29.0]), 29.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn parse_rejects_text_and_blanks() {
        assert_eq!(parse_f64_safe(Some(" 22.5 ")), Some(22.5));
        assert_eq!(parse_f64_safe(Some("1,024")), Some(1024.0));
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("NaN")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn parse_u32_accepts_integral_floats() {
        assert_eq!(parse_u32_safe(Some("3")), Some(3));
        assert_eq!(parse_u32_safe(Some("1.0")), Some(1));
        assert_eq!(parse_u32_safe(Some("1.5")), None);
        assert_eq!(parse_u32_safe(Some("-1")), None);
    }

    #[test]
    fn empty_inputs_have_no_average_or_range() {
        assert_eq!(average(&[]), None);
        assert_eq!(min_max(&[]), None);
        assert_eq!(percentage(1, 0), None);
        assert_eq!(min_max(&[3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
    }

    #[test]
    fn numbers_format_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(-12.5, 1), "-12.5");
        assert_eq!(format_pct(Some(50.0)), "50.00%");
        assert_eq!(format_pct(None), "n/a");
    }

    #[test]
    fn huge_numbers_keep_their_digits() {
        assert_eq!(format_number(1e20, 2), "100000000000000000000.00");
        assert_eq!(format_number(-1e20, 0), "-100000000000000000000");
    }
}
