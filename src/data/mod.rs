/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalesDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Datasets    │  unbalanced + balanced, shared read-only
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selection sets per dimension → filtered SalesDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sums, pair counts, summary metrics, chart inputs
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  DashboardView for the UI
///   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
