use super::aggregate::{
    aggregate_count, aggregate_sum, grouped_bars, pie_slices, summary_metrics, GroupedBars,
    PieSlice, SummaryMetrics,
};
use super::filter::{filter, Selections};
use super::model::{Datasets, Dimension, Measure, SalesDataset};

// ---------------------------------------------------------------------------
// Chart definitions
// ---------------------------------------------------------------------------

/// A grouped bar chart: bars counted per `x` value, one colour per `series` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub x: Dimension,
    pub series: Dimension,
    pub y_label: &'static str,
}

pub const REGION_BY_CATEGORY: BarChartSpec = BarChartSpec {
    id: "region_by_category",
    title: "Product Sales Per Category and Customer Region",
    x: Dimension::Region,
    series: Dimension::Category,
    y_label: "Quantity Sales Per Category",
};

pub const PAYMENT_BY_CATEGORY: BarChartSpec = BarChartSpec {
    id: "payment_by_category",
    title: "Payment Method Sales Per Category",
    x: Dimension::PaymentMethod,
    series: Dimension::Category,
    y_label: "Payment Methods Per Category",
};

pub const PAYMENT_BY_REGION: BarChartSpec = BarChartSpec {
    id: "payment_by_region",
    title: "Payment Methods per Customer Region",
    x: Dimension::Region,
    series: Dimension::PaymentMethod,
    y_label: "Quantity of the Payment Methods per Region",
};

pub const BAR_CHARTS: [BarChartSpec; 3] = [REGION_BY_CATEGORY, PAYMENT_BY_CATEGORY, PAYMENT_BY_REGION];

// ---------------------------------------------------------------------------
// Pipeline output
// ---------------------------------------------------------------------------

/// Everything one chart tab needs, derived from one filtered dataset.
#[derive(Debug, Clone)]
pub struct PanelData {
    pub filtered: SalesDataset,
    /// Quantity sold per product category.
    pub category_slices: Vec<PieSlice>,
    /// Aligned with [`BAR_CHARTS`].
    pub bars: Vec<(BarChartSpec, GroupedBars)>,
}

impl PanelData {
    pub fn compute(dataset: &SalesDataset, selections: &Selections) -> Self {
        let filtered = filter(dataset, selections);
        let category_slices = pie_slices(&aggregate_sum(
            &filtered,
            Dimension::Category,
            Measure::QuantitySold,
        ));
        let bars = BAR_CHARTS
            .iter()
            .map(|spec| {
                (
                    *spec,
                    grouped_bars(&aggregate_count(&filtered, spec.series, spec.x)),
                )
            })
            .collect();
        Self {
            filtered,
            category_slices,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// The full dashboard derived from the loaded data and the current selections.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub unbalanced: PanelData,
    pub balanced: PanelData,
    /// Computed on the filtered unbalanced dataset.
    pub metrics: SummaryMetrics,
}

impl DashboardView {
    pub fn compute(datasets: &Datasets, selections: &Selections) -> Self {
        let unbalanced = PanelData::compute(&datasets.unbalanced, selections);
        let balanced = PanelData::compute(&datasets.balanced, selections);
        let metrics = summary_metrics(&unbalanced.filtered);

        log::debug!(
            "Recomputed dashboard: {}/{} unbalanced rows, {}/{} balanced rows",
            unbalanced.filtered.len(),
            datasets.unbalanced.len(),
            balanced.filtered.len(),
            datasets.balanced.len()
        );
        for panel in [&unbalanced, &balanced] {
            if panel.is_empty() {
                log::warn!("Selection leaves no rows in the {} dataset", panel.filtered.name);
            }
        }

        Self {
            unbalanced,
            balanced,
            metrics,
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.unbalanced.filtered.len() + self.balanced.filtered.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterOptions;
    use crate::data::model::tests::sample_dataset;
    use crate::data::model::SalesRecord;

    fn datasets() -> Datasets {
        let balanced = SalesDataset::from_records(
            "balanced",
            vec![
                SalesRecord::new("2022-07-07", "US", "Books", "Cash", 4, 48.0, 12.0),
                SalesRecord::new("2024-07-07", "EU", "Electronics", "UPI", 1, 99.0, 99.0),
            ],
        );
        Datasets::new(sample_dataset(), balanced)
    }

    #[test]
    fn default_selection_shows_everything() {
        let ds = datasets();
        let sel = Selections::all(&FilterOptions::from_datasets(&ds));
        let view = DashboardView::compute(&ds, &sel);

        assert_eq!(view.unbalanced.filtered.records, ds.unbalanced.records);
        assert_eq!(view.balanced.filtered.records, ds.balanced.records);
        assert_eq!(view.visible_rows(), 4);
        assert_eq!(view.metrics.total_quantity, 5);
        assert_eq!(view.metrics.total_revenue, 50.0);
    }

    #[test]
    fn metrics_follow_the_filtered_unbalanced_rows() {
        let ds = datasets();
        let options = FilterOptions::from_datasets(&ds);
        let mut sel = Selections::all(&options);
        sel.select_none(Dimension::Region);
        sel.toggle(Dimension::Region, "US");

        let view = DashboardView::compute(&ds, &sel);
        assert_eq!(view.unbalanced.filtered.len(), 1);
        assert_eq!(view.metrics, summary_metrics(&view.unbalanced.filtered));
        assert_eq!(
            (
                view.metrics.total_quantity,
                view.metrics.total_revenue,
                view.metrics.min_price,
                view.metrics.max_price
            ),
            (3, 30.0, 10.0, 10.0)
        );
    }

    #[test]
    fn unknown_year_empties_both_panels() {
        let ds = datasets();
        let mut sel = Selections::all(&FilterOptions::from_datasets(&ds));
        sel.set(Dimension::Year, ["2099".to_string()].into());

        let view = DashboardView::compute(&ds, &sel);
        assert!(view.unbalanced.is_empty());
        assert!(view.balanced.is_empty());
        assert_eq!(view.metrics, SummaryMetrics::default());
        assert!(view.unbalanced.category_slices.is_empty());
        assert!(view.unbalanced.bars.iter().all(|(_, bars)| bars.is_empty()));
    }

    #[test]
    fn year_only_in_balanced_data_is_selectable() {
        let ds = datasets();
        let mut sel = Selections::all(&FilterOptions::from_datasets(&ds));
        sel.set(Dimension::Year, ["2024".to_string()].into());

        let view = DashboardView::compute(&ds, &sel);
        assert!(view.unbalanced.is_empty());
        assert_eq!(view.balanced.filtered.len(), 1);
        assert_eq!(view.balanced.filtered.records[0].order_year, "2024");
    }

    #[test]
    fn bars_follow_chart_definitions() {
        let ds = datasets();
        let sel = Selections::all(&FilterOptions::from_datasets(&ds));
        let view = DashboardView::compute(&ds, &sel);

        assert_eq!(view.balanced.bars.len(), BAR_CHARTS.len());
        let (spec, bars) = &view.balanced.bars[1];
        assert_eq!(*spec, PAYMENT_BY_CATEGORY);
        assert_eq!(bars.x_labels, ["Cash", "UPI"]);
        assert_eq!(
            bars.series,
            vec![
                ("Books".to_string(), vec![1, 0]),
                ("Electronics".to_string(), vec![0, 1]),
            ]
        );
    }
}
