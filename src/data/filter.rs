use std::collections::{BTreeMap, BTreeSet};

use super::model::{Datasets, Dimension, SalesDataset, SalesRecord};

// ---------------------------------------------------------------------------
// Filter options: the values offered by each sidebar control
// ---------------------------------------------------------------------------

/// Sorted distinct values of `dim` in one dataset.
pub fn distinct_values(dataset: &SalesDataset, dim: Dimension) -> BTreeSet<String> {
    dataset.values(dim).clone()
}

/// Sorted distinct values of `dim` across several datasets.
pub fn union_distinct_values(datasets: &[&SalesDataset], dim: Dimension) -> BTreeSet<String> {
    datasets
        .iter()
        .flat_map(|ds| ds.values(dim).iter().cloned())
        .collect()
}

/// Values offered per dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    options: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterOptions {
    /// Regions and categories come from the unbalanced dataset; payment
    /// methods and years are shared by both datasets, so they use the union.
    pub fn from_datasets(datasets: &Datasets) -> Self {
        let both = datasets.both();
        let options = Dimension::ALL
            .iter()
            .map(|&dim| {
                let values = match dim {
                    Dimension::Region | Dimension::Category => {
                        distinct_values(&datasets.unbalanced, dim)
                    }
                    Dimension::PaymentMethod | Dimension::Year => union_distinct_values(&both, dim),
                };
                (dim, values)
            })
            .collect();
        Self { options }
    }

    pub fn get(&self, dim: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.options.get(&dim).unwrap_or(&EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Selections: which values the user has picked per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection sets. A record passes when its value is in the
/// set for every dimension, so an empty set hides everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    selected: BTreeMap<Dimension, BTreeSet<String>>,
}

impl Selections {
    /// Every available option selected (the initial state).
    pub fn all(options: &FilterOptions) -> Self {
        let selected = Dimension::ALL
            .iter()
            .map(|&dim| (dim, options.get(dim).clone()))
            .collect();
        Self { selected }
    }

    /// Build from explicit value lists; dimensions not listed select nothing.
    #[cfg(test)]
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (Dimension, V)>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let selected = values
            .into_iter()
            .map(|(dim, vals)| (dim, vals.into_iter().map(Into::into).collect()))
            .collect();
        Self { selected }
    }

    pub fn get(&self, dim: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.selected.get(&dim).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, dim: Dimension, values: BTreeSet<String>) {
        self.selected.insert(dim, values);
    }

    pub fn is_selected(&self, dim: Dimension, value: &str) -> bool {
        self.get(dim).contains(value)
    }

    /// Flip one value of one dimension.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let set = self.selected.entry(dim).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    pub fn select_all(&mut self, dim: Dimension, options: &FilterOptions) {
        self.set(dim, options.get(dim).clone());
    }

    pub fn select_none(&mut self, dim: Dimension) {
        self.set(dim, BTreeSet::new());
    }

    /// Whether a record passes all four predicates.
    fn matches(&self, record: &SalesRecord) -> bool {
        Dimension::ALL
            .iter()
            .all(|&dim| self.get(dim).contains(dim.value_of(record)))
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Indices of records passing every selection, in dataset order.
pub fn filtered_indices(dataset: &SalesDataset, selections: &Selections) -> Vec<usize> {
    if Dimension::ALL.iter().any(|&dim| selections.get(dim).is_empty()) {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selections.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// A new dataset holding only the matching records.
pub fn filter(dataset: &SalesDataset, selections: &Selections) -> SalesDataset {
    let records = filtered_indices(dataset, selections)
        .into_iter()
        .map(|i| dataset.records[i].clone())
        .collect();
    SalesDataset::from_records(dataset.name.clone(), records)
}
