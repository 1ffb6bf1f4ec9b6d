use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, Measure, SalesDataset};

// ---------------------------------------------------------------------------
// Group-by aggregates
// ---------------------------------------------------------------------------

/// Sum of `value` per distinct `group` value.
pub fn aggregate_sum(
    dataset: &SalesDataset,
    group: Dimension,
    value: Measure,
) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for rec in &dataset.records {
        *sums.entry(group.value_of(rec).to_string()).or_default() += value.value_of(rec);
    }
    sums
}

/// Number of records per `(a, b)` value pair.
pub fn aggregate_count(
    dataset: &SalesDataset,
    a: Dimension,
    b: Dimension,
) -> BTreeMap<(String, String), usize> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for rec in &dataset.records {
        let key = (a.value_of(rec).to_string(), b.value_of(rec).to_string());
        *counts.entry(key).or_default() += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Headline numbers shown above the charts. All zero for an empty dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryMetrics {
    pub total_quantity: u64,
    pub total_revenue: f64,
    pub min_price: f64,
    pub max_price: f64,
}

pub fn summary_metrics(dataset: &SalesDataset) -> SummaryMetrics {
    if dataset.is_empty() {
        return SummaryMetrics::default();
    }
    let records = &dataset.records;
    SummaryMetrics {
        total_quantity: records.iter().map(|r| r.quantity_sold).sum(),
        total_revenue: records.iter().map(|r| r.total_revenue).sum(),
        min_price: records.iter().map(|r| r.price).fold(f64::INFINITY, f64::min),
        max_price: records.iter().map(|r| r.price).fold(f64::NEG_INFINITY, f64::max),
    }
}

// ---------------------------------------------------------------------------
// Chart inputs
// ---------------------------------------------------------------------------

/// One slice of the category pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total, in `0.0..=1.0`.
    pub fraction: f64,
}

/// Convert group sums to pie slices, dropping non-positive groups.
pub fn pie_slices(sums: &BTreeMap<String, f64>) -> Vec<PieSlice> {
    let total: f64 = sums.values().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    sums.iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(label, &value)| PieSlice {
            label: label.clone(),
            value,
            fraction: value / total,
        })
        .collect()
}

/// Input for a grouped bar chart: one bar per series at every x position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedBars {
    pub x_labels: Vec<String>,
    /// `(series label, count per x label)`; counts align with `x_labels`.
    pub series: Vec<(String, Vec<usize>)>,
}

impl GroupedBars {
    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|(_, counts)| counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Pivot `(series, x) -> count` into aligned series, filling absent pairs with 0.
pub fn grouped_bars(counts: &BTreeMap<(String, String), usize>) -> GroupedBars {
    let x_labels: Vec<String> = counts
        .keys()
        .map(|(_, x)| x.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let x_pos: BTreeMap<&str, usize> = x_labels
        .iter()
        .enumerate()
        .map(|(i, x)| (x.as_str(), i))
        .collect();

    let mut series: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for ((name, x), &n) in counts {
        let row = series
            .entry(name.as_str())
            .or_insert_with(|| vec![0; x_labels.len()]);
        row[x_pos[x.as_str()]] = n;
    }

    GroupedBars {
        series: series
            .into_iter()
            .map(|(name, row)| (name.to_string(), row))
            .collect(),
        x_labels,
    }
}
