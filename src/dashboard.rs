//! The pure (dataset, selection) -> derived-state pipeline.
//!
//! Every selection change triggers one full recomputation through here; no
//! caching, no incremental update. Keeping the pipeline a free function of
//! its inputs is what replaces the reactive recomputation of a dataflow UI
//! framework: the event loop decides when to call it, the data decides what
//! comes out.

use color_eyre::Result;
use polars::prelude::DataFrame;

use crate::chart_data::{self, HistogramBin};
use crate::filters::{self, FilterSelection};
use crate::metrics::{self, SummaryMetrics};

/// Everything the dashboard renders, derived from one pass over the view.
pub struct DashboardData {
    pub filtered: DataFrame,
    pub metrics: SummaryMetrics,
    pub top_roles: Vec<(String, f64)>,
    pub country_means: Vec<(String, f64)>,
    pub histogram: Vec<HistogramBin>,
}

/// Filters the dataset with the selection and derives metrics and chart
/// series from the result. Pure: same inputs, same outputs, dataset never
/// mutated.
pub fn compute_view(
    records: &DataFrame,
    selection: &FilterSelection,
    top_roles_n: usize,
    histogram_bins: usize,
) -> Result<DashboardData> {
    let filtered = filters::apply_filters(records, selection)?;
    let metrics = metrics::compute_metrics(&filtered)?;
    let top_roles = chart_data::top_roles(&filtered, top_roles_n)?;
    let country_means = chart_data::country_means(&filtered)?;
    let histogram = chart_data::salary_histogram(&filtered, histogram_bins)?;
    Ok(DashboardData {
        filtered,
        metrics,
        top_roles,
        country_means,
        histogram,
    })
}
