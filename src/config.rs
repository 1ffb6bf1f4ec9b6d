use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration. Every flag can also be set from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-dashboard", version, about = "Interactive e-commerce sales dashboard")]
pub struct Args {
    /// Highly unbalanced sales dataset (.csv, .json or .parquet).
    #[arg(
        long,
        env = "SALES_UNBALANCED_PATH",
        default_value = "resources/amazon_sales_highly_unbalanced_v3.csv"
    )]
    pub unbalanced: PathBuf,

    /// Balanced sales dataset (.csv, .json or .parquet).
    #[arg(
        long,
        env = "SALES_BALANCED_PATH",
        default_value = "resources/amazon_sales_dataset.csv"
    )]
    pub balanced: PathBuf,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1400.0)]
    pub width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}
