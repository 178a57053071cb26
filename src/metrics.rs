//! Scalar summary metrics over the filtered view.

use color_eyre::Result;
use polars::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::dataset::{COL_COUNTRY, COL_ROLE, COL_SALARY};

/// Sentinel shown for the mode metrics when the view has no usable values.
pub const NOT_APPLICABLE: &str = "N/A";

/// The eight headline metrics, recomputed in full on every selection change.
///
/// Mean and median are truncated toward zero to whole USD for display (the
/// dashboard shows integer dollars); max and min keep native precision. An
/// empty view produces the explicit zero state below rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryMetrics {
    pub mean_usd: i64,
    pub median_usd: i64,
    pub max_usd: f64,
    pub min_usd: f64,
    pub record_count: usize,
    pub top_role: String,
    pub top_country: String,
    pub distinct_countries: usize,
    pub salary_count: usize,
}

impl SummaryMetrics {
    /// The zero state rendered for an empty filtered view.
    pub fn zero() -> Self {
        Self {
            mean_usd: 0,
            median_usd: 0,
            max_usd: 0.0,
            min_usd: 0.0,
            record_count: 0,
            top_role: NOT_APPLICABLE.to_string(),
            top_country: NOT_APPLICABLE.to_string(),
            distinct_countries: 0,
            salary_count: 0,
        }
    }
}

/// Most frequent value with the first-occurrence tie-break: when counts tie,
/// the value appearing earliest in the view wins. A manual scan rather than
/// an engine mode so the tie-break is pinned, not hash-order dependent.
fn first_mode(ca: &StringChunked) -> Option<String> {
    let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in ca.into_iter().enumerate() {
        if let Some(v) = value {
            let entry = stats.entry(v).or_insert((0, idx));
            entry.0 += 1;
        }
    }
    stats
        .into_iter()
        .max_by(|a, b| {
            // Highest count first; earliest first occurrence breaks ties.
            a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1))
        })
        .map(|(v, _)| v.to_string())
}

/// Median of a non-empty slice, sorted in place.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Computes the summary metrics for a filtered view.
pub fn compute_metrics(filtered: &DataFrame) -> Result<SummaryMetrics> {
    if filtered.height() == 0 {
        return Ok(SummaryMetrics::zero());
    }

    let salary_ca = filtered.column(COL_SALARY)?.f64()?;
    let mut salaries: Vec<f64> = salary_ca.into_iter().flatten().collect();
    let salary_count = salaries.len();

    let (mean_usd, median_usd, max_usd, min_usd) = if salaries.is_empty() {
        (0, 0, 0.0, 0.0)
    } else {
        let mean = salaries.iter().sum::<f64>() / salaries.len() as f64;
        let median = median(&mut salaries);
        // Sorted by median(); min and max are the ends.
        let min = salaries[0];
        let max = salaries[salaries.len() - 1];
        (mean.trunc() as i64, median.trunc() as i64, max, min)
    };

    let role_ca = filtered.column(COL_ROLE)?.str()?;
    let country_ca = filtered.column(COL_COUNTRY)?.str()?;
    let distinct_countries = country_ca
        .into_iter()
        .flatten()
        .collect::<HashSet<&str>>()
        .len();

    Ok(SummaryMetrics {
        mean_usd,
        median_usd,
        max_usd,
        min_usd,
        record_count: filtered.height(),
        top_role: first_mode(role_ca).unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        top_country: first_mode(country_ca).unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        distinct_countries,
        salary_count,
    })
}
