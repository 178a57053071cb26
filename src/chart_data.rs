//! Chart-ready series from the filtered view: top roles by mean salary,
//! mean salary per country, and the salary distribution histogram.

use color_eyre::Result;
use polars::prelude::*;
use std::collections::HashMap;

use crate::dataset::{COL_COUNTRY, COL_ROLE, COL_SALARY};

/// Bin count for the salary distribution histogram.
pub const HISTOGRAM_BINS: usize = 80;

/// Number of roles shown in the top-roles bar chart.
pub const TOP_ROLES: usize = 5;

/// One histogram bin: inclusive lower bound and the row count falling in it.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Mean salary per group key, grouped in first-appearance order so that ties
/// anywhere downstream resolve to the earlier-appearing group.
fn group_means(keys: &StringChunked, salaries: &Float64Chunked) -> Vec<(String, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for (key, salary) in keys.into_iter().zip(salaries) {
        let (Some(key), Some(salary)) = (key, salary) else {
            continue;
        };
        let entry = sums.entry(key).or_insert_with(|| {
            order.push(key);
            (0.0, 0)
        });
        entry.0 += salary;
        entry.1 += 1;
    }
    order
        .into_iter()
        .map(|key| {
            let (sum, count) = sums[key];
            (key.to_string(), sum / count as f64)
        })
        .collect()
}

/// Top `n` roles by mean salary, returned ascending by mean so a horizontal
/// bar chart renders smallest-to-largest. Ranking uses a stable descending
/// sort over first-appearance groups: a tie at the cut keeps the role that
/// appears first in the view.
pub fn top_roles(filtered: &DataFrame, n: usize) -> Result<Vec<(String, f64)>> {
    let roles = filtered.column(COL_ROLE)?.str()?;
    let salaries = filtered.column(COL_SALARY)?.f64()?;
    let mut means = group_means(roles, salaries);
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means.truncate(n);
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(means)
}

/// Mean salary per residence country, all countries, ascending by ISO3 code.
/// Feeds the per-country surface (a map front-end would key on the code).
pub fn country_means(filtered: &DataFrame) -> Result<Vec<(String, f64)>> {
    let countries = filtered.column(COL_COUNTRY)?.str()?;
    let salaries = filtered.column(COL_SALARY)?.f64()?;
    let mut means = group_means(countries, salaries);
    means.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(means)
}

/// Equal-width histogram of the salary column over [min, max].
/// Empty view (or all-null salaries) yields no bins; a single distinct value
/// yields one bin holding everything.
pub fn salary_histogram(filtered: &DataFrame, bins: usize) -> Result<Vec<HistogramBin>> {
    let salary_ca = filtered.column(COL_SALARY)?.f64()?;
    let values: Vec<f64> = salary_ca.into_iter().flatten().collect();
    if values.is_empty() || bins == 0 {
        return Ok(Vec::new());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return Ok(vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len() as u64,
        }]);
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for v in &values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect())
}

/// The salary range a histogram spans, for the surface title: lower bound
/// of the first bin to upper bound of the last. None when there are no bins.
pub fn histogram_range(bins: &[HistogramBin]) -> Option<String> {
    let first = bins.first()?;
    let last = bins.last()?;
    Some(format!(
        "{} to {}",
        format_usd(first.lower.trunc() as i64),
        format_usd(last.upper.trunc() as i64)
    ))
}

/// Formats a whole-dollar amount with thousands separators, e.g. `$95,000`.
pub fn format_usd(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(amount.unsigned_abs()))
}

/// Formats a count with thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{COL_COMPANY_SIZE, COL_MODALITY, COL_SENIORITY, COL_YEAR};

    fn frame(roles: &[&str], countries: &[&str], salaries: &[f64]) -> DataFrame {
        let n = roles.len();
        df!(
            COL_YEAR => &vec![2023i64; n],
            COL_SENIORITY => &vec!["senior"; n],
            COL_MODALITY => &vec!["remote"; n],
            COL_COMPANY_SIZE => &vec!["large"; n],
            COL_ROLE => roles,
            COL_COUNTRY => countries,
            COL_SALARY => salaries,
        )
        .unwrap()
    }

    #[test]
    fn top_roles_ascending_and_capped() -> Result<()> {
        let df = frame(
            &["a", "b", "c", "d", "e", "f"],
            &["USA"; 6],
            &[60.0, 50.0, 40.0, 30.0, 20.0, 10.0],
        );
        let top = top_roles(&df, 5)?;
        assert_eq!(top.len(), 5);
        // Ascending by mean; the lowest-paid role "f" fell off the ranking.
        assert_eq!(
            top,
            vec![
                ("e".to_string(), 20.0),
                ("d".to_string(), 30.0),
                ("c".to_string(), 40.0),
                ("b".to_string(), 50.0),
                ("a".to_string(), 60.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn top_roles_means_are_per_group() -> Result<()> {
        let df = frame(
            &["data engineer", "data analyst", "data engineer"],
            &["USA", "BRA", "USA"],
            &[100.0, 40.0, 200.0],
        );
        let top = top_roles(&df, 5)?;
        assert_eq!(
            top,
            vec![
                ("data analyst".to_string(), 40.0),
                ("data engineer".to_string(), 150.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn top_roles_boundary_tie_keeps_first_occurrence() -> Result<()> {
        // "e" and "f" tie on mean; "e" appears first in the view and must
        // take the fifth slot.
        let df = frame(
            &["a", "b", "c", "d", "e", "f"],
            &["USA"; 6],
            &[60.0, 50.0, 40.0, 30.0, 20.0, 20.0],
        );
        let top = top_roles(&df, 5)?;
        assert_eq!(top.first().map(|(r, _)| r.as_str()), Some("e"));
        assert!(!top.iter().any(|(r, _)| r == "f"));
        Ok(())
    }

    #[test]
    fn empty_view_yields_empty_series() -> Result<()> {
        let df = frame(&[], &[], &[]);
        assert!(top_roles(&df, 5)?.is_empty());
        assert!(country_means(&df)?.is_empty());
        assert!(salary_histogram(&df, HISTOGRAM_BINS)?.is_empty());
        Ok(())
    }

    #[test]
    fn country_means_sorted_by_code_and_complete() -> Result<()> {
        let df = frame(
            &["a", "b", "c", "d"],
            &["USA", "BRA", "USA", "PRT"],
            &[100.0, 40.0, 200.0, 60.0],
        );
        let means = country_means(&df)?;
        assert_eq!(means.len(), 3);
        assert_eq!(
            means,
            vec![
                ("BRA".to_string(), 40.0),
                ("PRT".to_string(), 60.0),
                ("USA".to_string(), 150.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn histogram_counts_sum_to_rows() -> Result<()> {
        let salaries: Vec<f64> = (0..200).map(|i| 1000.0 * i as f64).collect();
        let roles: Vec<&str> = vec!["r"; 200];
        let countries: Vec<&str> = vec!["USA"; 200];
        let df = frame(&roles, &countries, &salaries);
        let bins = salary_histogram(&df, HISTOGRAM_BINS)?;
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 200);
        // Max value lands in the last bin, not out of range.
        assert!(bins.last().unwrap().count > 0);
        Ok(())
    }

    #[test]
    fn histogram_single_value_is_one_bin() -> Result<()> {
        let df = frame(&["a", "b"], &["USA", "USA"], &[500.0, 500.0]);
        let bins = salary_histogram(&df, HISTOGRAM_BINS)?;
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[0].lower, 500.0);
        Ok(())
    }

    #[test]
    fn histogram_range_spans_first_to_last_bin() -> Result<()> {
        let df = frame(
            &["a", "b", "c"],
            &["USA", "USA", "USA"],
            &[40000.0, 95000.0, 150000.0],
        );
        let bins = salary_histogram(&df, HISTOGRAM_BINS)?;
        assert_eq!(
            histogram_range(&bins).as_deref(),
            Some("$40,000 to $150,000")
        );
        assert_eq!(histogram_range(&[]), None);
        Ok(())
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(950), "$950");
        assert_eq!(format_usd(95000), "$95,000");
        assert_eq!(format_usd(1234567), "$1,234,567");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(999), "999");
    }
}
