//! Filter menus and the row-inclusion predicate.
//!
//! Options are derived once from the full dataset; the predicate combines the
//! user's per-dimension selections into a single boolean row mask (AND across
//! dimensions, membership within a dimension) and applies it to produce the
//! filtered view.

use color_eyre::Result;
use polars::prelude::*;
use std::collections::HashSet;

use crate::dataset::{COL_COMPANY_SIZE, COL_MODALITY, COL_SENIORITY, COL_YEAR};

/// Sorted distinct values per filterable column, derived from the full
/// dataset at load time. Deterministic for a fixed dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
    pub modalities: Vec<String>,
    pub years: Vec<i64>,
    pub seniorities: Vec<String>,
    pub company_sizes: Vec<String>,
}

/// The user's current filter choices: one modality (single-select) and a
/// selected subset per multi-select dimension. An empty subset matches no
/// rows (vacuous membership), which the UI renders as the zero state.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSelection {
    pub modality: Option<String>,
    pub years: Vec<i64>,
    pub seniorities: Vec<String>,
    pub company_sizes: Vec<String>,
}

impl FilterSelection {
    /// The default selection: first modality, every value of each
    /// multi-select dimension.
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            modality: options.modalities.first().cloned(),
            years: options.years.clone(),
            seniorities: options.seniorities.clone(),
            company_sizes: options.company_sizes.clone(),
        }
    }
}

/// Distinct sorted values of a string column.
fn distinct_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let ca = df.column(name)?.str()?;
    let mut values: Vec<String> = ca.into_iter().flatten().map(str::to_string).collect();
    values.sort();
    values.dedup();
    Ok(values)
}

/// Derives the filter menus from the full dataset. Always computed over the
/// full dataset, never a filtered view.
pub fn derive_filter_options(df: &DataFrame) -> Result<FilterOptions> {
    let ca = df.column(COL_YEAR)?.i64()?;
    let mut years: Vec<i64> = ca.into_iter().flatten().collect();
    years.sort_unstable();
    years.dedup();

    Ok(FilterOptions {
        modalities: distinct_strings(df, COL_MODALITY)?,
        years,
        seniorities: distinct_strings(df, COL_SENIORITY)?,
        company_sizes: distinct_strings(df, COL_COMPANY_SIZE)?,
    })
}

/// Applies the selection to the full dataset and returns the filtered view.
/// Comparisons are exact equality on the raw values; nulls never match.
/// The dataset itself is untouched.
pub fn apply_filters(df: &DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    let years: HashSet<i64> = selection.years.iter().copied().collect();
    let seniorities: HashSet<&str> = selection.seniorities.iter().map(String::as_str).collect();
    let sizes: HashSet<&str> = selection.company_sizes.iter().map(String::as_str).collect();
    let modality = selection.modality.as_deref();

    let year_ca = df.column(COL_YEAR)?.i64()?;
    let seniority_ca = df.column(COL_SENIORITY)?.str()?;
    let modality_ca = df.column(COL_MODALITY)?.str()?;
    let size_ca = df.column(COL_COMPANY_SIZE)?.str()?;

    let mut mask = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let keep = year_ca.get(i).is_some_and(|y| years.contains(&y))
            && seniority_ca.get(i).is_some_and(|s| seniorities.contains(s))
            && size_ca.get(i).is_some_and(|s| sizes.contains(s))
            && modality_ca.get(i).is_some_and(|m| modality == Some(m));
        mask.push(keep);
    }

    let mask = BooleanChunked::from_slice("mask".into(), &mask);
    df.filter(&mask).map_err(color_eyre::eyre::Report::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{COL_COUNTRY, COL_ROLE, COL_SALARY};

    fn sample() -> DataFrame {
        df!(
            COL_YEAR => &[2023i64, 2023, 2024, 2024],
            COL_SENIORITY => &["senior", "junior", "senior", "pleno"],
            COL_MODALITY => &["remote", "remote", "hybrid", "remote"],
            COL_COMPANY_SIZE => &["large", "small", "large", "medium"],
            COL_ROLE => &["data engineer", "data analyst", "data scientist", "data analyst"],
            COL_COUNTRY => &["USA", "BRA", "USA", "PRT"],
            COL_SALARY => &[150000.0f64, 40000.0, 120000.0, 60000.0],
        )
        .unwrap()
    }

    #[test]
    fn options_are_sorted_and_deduped() -> Result<()> {
        let opts = derive_filter_options(&sample())?;
        assert_eq!(opts.years, vec![2023, 2024]);
        assert_eq!(opts.modalities, vec!["hybrid", "remote"]);
        assert_eq!(opts.seniorities, vec!["junior", "pleno", "senior"]);
        assert_eq!(opts.company_sizes, vec!["large", "medium", "small"]);
        Ok(())
    }

    #[test]
    fn options_ignore_current_selection() -> Result<()> {
        // Options come from the full dataset even after filtering.
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let mut selection = FilterSelection::all(&opts);
        selection.years = vec![2024];
        let filtered = apply_filters(&df, &selection)?;
        assert!(filtered.height() < df.height());
        assert_eq!(derive_filter_options(&df)?, opts);
        Ok(())
    }

    #[test]
    fn default_selection_keeps_matching_modality_rows() -> Result<()> {
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let selection = FilterSelection::all(&opts);
        // First modality sorts to "hybrid"; only the 2024 USA row matches.
        let filtered = apply_filters(&df, &selection)?;
        assert_eq!(filtered.height(), 1);
        let countries = filtered.column(COL_COUNTRY)?.str()?;
        assert_eq!(countries.get(0), Some("USA"));
        Ok(())
    }

    #[test]
    fn filtered_view_is_a_subsequence() -> Result<()> {
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let mut selection = FilterSelection::all(&opts);
        selection.modality = Some("remote".to_string());
        let filtered = apply_filters(&df, &selection)?;
        assert_eq!(filtered.height(), 3);
        // Dataset order preserved.
        let salaries = filtered.column(COL_SALARY)?.f64()?;
        assert_eq!(salaries.get(0), Some(150000.0));
        assert_eq!(salaries.get(1), Some(40000.0));
        assert_eq!(salaries.get(2), Some(60000.0));
        // Every included row satisfies the modality predicate.
        let modalities = filtered.column(COL_MODALITY)?.str()?;
        for i in 0..filtered.height() {
            assert_eq!(modalities.get(i), Some("remote"));
        }
        Ok(())
    }

    #[test]
    fn conjunction_across_dimensions() -> Result<()> {
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let mut selection = FilterSelection::all(&opts);
        selection.modality = Some("remote".to_string());
        selection.years = vec![2023];
        selection.seniorities = vec!["senior".to_string()];
        let filtered = apply_filters(&df, &selection)?;
        assert_eq!(filtered.height(), 1);
        assert_eq!(filtered.column(COL_ROLE)?.str()?.get(0), Some("data engineer"));
        Ok(())
    }

    #[test]
    fn empty_multiselect_yields_empty_view() -> Result<()> {
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let mut selection = FilterSelection::all(&opts);
        selection.modality = Some("remote".to_string());
        selection.years.clear();
        let filtered = apply_filters(&df, &selection)?;
        assert_eq!(filtered.height(), 0);
        Ok(())
    }

    #[test]
    fn no_modality_selected_yields_empty_view() -> Result<()> {
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let mut selection = FilterSelection::all(&opts);
        selection.modality = None;
        assert_eq!(apply_filters(&df, &selection)?.height(), 0);
        Ok(())
    }

    #[test]
    fn comparisons_are_exact_no_case_folding() -> Result<()> {
        let df = sample();
        let opts = derive_filter_options(&df)?;
        let mut selection = FilterSelection::all(&opts);
        selection.modality = Some("Remote".to_string());
        assert_eq!(apply_filters(&df, &selection)?.height(), 0);
        Ok(())
    }
}
