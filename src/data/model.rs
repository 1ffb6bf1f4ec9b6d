use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Dimension – the four categorical filter columns
// ---------------------------------------------------------------------------

/// A categorical column a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Region,
    Category,
    PaymentMethod,
    Year,
}

impl Dimension {
    /// All dimensions, in sidebar order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Category,
        Dimension::PaymentMethod,
        Dimension::Year,
    ];

    /// Human-readable label used in the sidebar and chart axes.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Customer Region",
            Dimension::Category => "Product Category",
            Dimension::PaymentMethod => "Payment Method",
            Dimension::Year => "Order Year",
        }
    }

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Region => "customer_region",
            Dimension::Category => "product_category",
            Dimension::PaymentMethod => "payment_method",
            Dimension::Year => "order_year",
        }
    }

    /// The record's value for this dimension.
    pub fn value_of(self, record: &SalesRecord) -> &str {
        match self {
            Dimension::Region => &record.customer_region,
            Dimension::Category => &record.product_category,
            Dimension::PaymentMethod => &record.payment_method,
            Dimension::Year => &record.order_year,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Measure – numeric columns that can be summed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    QuantitySold,
    TotalRevenue,
    Price,
}

impl Measure {
    pub fn label(self) -> &'static str {
        match self {
            Measure::QuantitySold => "Quantity Sold",
            Measure::TotalRevenue => "Total Revenue",
            Measure::Price => "Price",
        }
    }

    pub fn value_of(self, record: &SalesRecord) -> f64 {
        match self {
            Measure::QuantitySold => record.quantity_sold as f64,
            Measure::TotalRevenue => record.total_revenue,
            Measure::Price => record.price,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of a sales file
// ---------------------------------------------------------------------------

/// A single order line.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// ISO-8601 date kept as text; only the year prefix is interpreted.
    pub order_date: String,
    pub customer_region: String,
    pub product_category: String,
    pub payment_method: String,
    pub quantity_sold: u64,
    pub total_revenue: f64,
    pub price: f64,
    /// First four characters of `order_date`.
    pub order_year: String,
}

impl SalesRecord {
    pub fn new(
        order_date: impl Into<String>,
        customer_region: impl Into<String>,
        product_category: impl Into<String>,
        payment_method: impl Into<String>,
        quantity_sold: u64,
        total_revenue: f64,
        price: f64,
    ) -> Self {
        let order_date = order_date.into();
        let order_year = year_prefix(&order_date).to_string();
        Self {
            order_date,
            customer_region: customer_region.into(),
            product_category: product_category.into(),
            payment_method: payment_method.into(),
            quantity_sold,
            total_revenue,
            price,
            order_year,
        }
    }
}

/// The first four characters of a date string, or the whole string when shorter.
pub fn year_prefix(date: &str) -> &str {
    match date.char_indices().nth(4) {
        Some((end, _)) => &date[..end],
        None => date,
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – one loaded (or filtered) file
// ---------------------------------------------------------------------------

/// An ordered set of records with pre-computed distinct values per dimension.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    /// Display name ("unbalanced", "balanced", or a file stem).
    pub name: String,
    pub records: Vec<SalesRecord>,
    /// For each dimension the sorted set of values present.
    pub unique_values: BTreeMap<Dimension, BTreeSet<String>>,
}

impl SalesDataset {
    /// Build dimension indices from the records.
    pub fn from_records(name: impl Into<String>, records: Vec<SalesRecord>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<String>> = Dimension::ALL
            .iter()
            .map(|&dim| (dim, BTreeSet::new()))
            .collect();

        for rec in &records {
            for dim in Dimension::ALL {
                unique_values
                    .entry(dim)
                    .or_default()
                    .insert(dim.value_of(rec).to_string());
            }
        }

        SalesDataset {
            name: name.into(),
            records,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values present for `dim`.
    pub fn values(&self, dim: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.unique_values.get(&dim).unwrap_or(&EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Datasets – the pair loaded at startup
// ---------------------------------------------------------------------------

/// The two datasets the dashboard compares. Built once, then shared read-only.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub unbalanced: SalesDataset,
    pub balanced: SalesDataset,
}

impl Datasets {
    pub fn new(unbalanced: SalesDataset, balanced: SalesDataset) -> Self {
        Self {
            unbalanced,
            balanced,
        }
    }

    pub fn both(&self) -> [&SalesDataset; 2] {
        [&self.unbalanced, &self.balanced]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The two-row dataset used across the data layer tests.
    pub(crate) fn sample_dataset() -> SalesDataset {
        SalesDataset::from_records(
            "sample",
            vec![
                SalesRecord::new("2022-05-01", "US", "Electronics", "Card", 3, 30.0, 10.0),
                SalesRecord::new("2023-01-01", "EU", "Books", "Cash", 2, 20.0, 10.0),
            ],
        )
    }

    #[test]
    fn order_year_is_date_prefix() {
        let rec = SalesRecord::new("2022-05-01 13:45:00", "US", "Books", "Card", 1, 1.0, 1.0);
        assert_eq!(rec.order_year, "2022");
        assert_eq!(year_prefix("202"), "202");
        assert_eq!(year_prefix(""), "");
    }

    #[test]
    fn unique_values_are_sorted_per_dimension() {
        let ds = sample_dataset();
        let regions: Vec<&str> = ds.values(Dimension::Region).iter().map(String::as_str).collect();
        assert_eq!(regions, ["EU", "US"]);
        let years: Vec<&str> = ds.values(Dimension::Year).iter().map(String::as_str).collect();
        assert_eq!(years, ["2022", "2023"]);
    }

    #[test]
    fn empty_dataset_has_empty_indices() {
        let ds = SalesDataset::from_records("empty", Vec::new());
        assert!(ds.is_empty());
        for dim in Dimension::ALL {
            assert!(ds.values(dim).is_empty());
        }
    }
}
