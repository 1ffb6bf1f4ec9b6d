use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, Float64Array, StringArray, UInt64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{SalesDataset, SalesRecord};

/// Columns every sales file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "order_date",
    "customer_region",
    "product_category",
    "payment_method",
    "quantity_sold",
    "total_revenue",
    "price",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: &'static str },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "order_date": "...", "customer_region": "...", ... }, ...]`
/// * `.parquet` – one column per field; numeric columns of any integer/float type
pub fn load_file(path: &Path, name: &str) -> Result<SalesDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(SalesDataset::from_records(name, records))
}

/// Row layout shared by the CSV and JSON loaders.
#[derive(Debug, Deserialize)]
struct RawRecord {
    order_date: String,
    customer_region: String,
    product_category: String,
    payment_method: String,
    quantity_sold: u64,
    total_revenue: f64,
    price: f64,
}

impl From<RawRecord> for SalesRecord {
    fn from(raw: RawRecord) -> Self {
        SalesRecord::new(
            raw.order_date,
            raw.customer_region,
            raw.product_category,
            raw.payment_method,
            raw.quantity_sold,
            raw.total_revenue,
            raw.price,
        )
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<SalesRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()).into());
        }
    }

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(row_no, result)| {
            result
                .map(SalesRecord::from)
                .with_context(|| format!("CSV row {row_no}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the layout of `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<SalesRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON records")?;
    Ok(rows.into_iter().map(SalesRecord::from).collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); numeric columns are cast to the
/// record's types.
fn load_parquet(path: &Path) -> Result<Vec<SalesRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let dates: StringArray = typed_column(&batch, "order_date", &DataType::Utf8)?;
        let regions: StringArray = typed_column(&batch, "customer_region", &DataType::Utf8)?;
        let categories: StringArray = typed_column(&batch, "product_category", &DataType::Utf8)?;
        let payments: StringArray = typed_column(&batch, "payment_method", &DataType::Utf8)?;
        let quantities: UInt64Array = typed_column(&batch, "quantity_sold", &DataType::UInt64)?;
        let revenues: Float64Array = typed_column(&batch, "total_revenue", &DataType::Float64)?;
        let prices: Float64Array = typed_column(&batch, "price", &DataType::Float64)?;

        for row in 0..batch.num_rows() {
            let absolute = row_offset + row;
            let columns: [(&dyn Array, &'static str); 7] = [
                (&dates, "order_date"),
                (&regions, "customer_region"),
                (&categories, "product_category"),
                (&payments, "payment_method"),
                (&quantities, "quantity_sold"),
                (&revenues, "total_revenue"),
                (&prices, "price"),
            ];
            if let Some((_, column)) = columns.iter().find(|(arr, _)| arr.is_null(row)) {
                return Err(LoadError::NullValue {
                    row: absolute,
                    column: *column,
                }
                .into());
            }

            records.push(SalesRecord::new(
                dates.value(row),
                regions.value(row),
                categories.value(row),
                payments.value(row),
                quantities.value(row),
                revenues.value(row),
                prices.value(row),
            ));
        }
        row_offset += batch.num_rows();
    }

    Ok(records)
}

/// Look up `name`, cast it to `to`, and downcast to the concrete array type.
fn typed_column<A>(batch: &RecordBatch, name: &str, to: &DataType) -> Result<A>
where
    A: Array + Clone + 'static,
{
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    let casted = cast(batch.column(idx).as_ref(), to)
        .with_context(|| format!("casting column '{name}' to {to:?}"))?;
    casted
        .as_any()
        .downcast_ref::<A>()
        .cloned()
        .with_context(|| format!("column '{name}' is not {to:?} after cast"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::Dimension;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file.flush().expect("flush temp file");
        file
    }

    #[test]
    fn csv_with_extra_columns() {
        let file = temp_file(
            ".csv",
            "order_id,order_date,product_id,product_category,price,discount_percent,quantity_sold,customer_region,payment_method,rating,review_count,discounted_price,total_revenue\n\
             1,2022-05-01,10,Electronics,10.0,0,3,North America,Credit Card,4.5,12,10.0,30.0\n\
             2,2023-01-01,11,Books,10.0,5,2,Europe,Cash on Delivery,3.9,3,9.5,20.0\n",
        );
        let ds = load_file(file.path(), "unbalanced").expect("load csv");

        assert_eq!(ds.name, "unbalanced");
        assert_eq!(ds.len(), 2);
        let first = &ds.records[0];
        assert_eq!(first.customer_region, "North America");
        assert_eq!(first.payment_method, "Credit Card");
        assert_eq!(first.quantity_sold, 3);
        assert_eq!(first.total_revenue, 30.0);
        assert_eq!(first.order_year, "2022");
        assert_eq!(ds.values(Dimension::Year).len(), 2);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = temp_file(
            ".csv",
            "order_date,customer_region,product_category,payment_method,quantity_sold,price\n\
             2022-05-01,US,Books,Card,1,1.0\n",
        );
        let err = load_file(file.path(), "x").unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingColumn(col)) => assert_eq!(col, "total_revenue"),
            other => panic!("unexpected error: {other:?} ({err:#})"),
        }
    }

    #[test]
    fn csv_bad_number_names_the_row() {
        let file = temp_file(
            ".csv",
            "order_date,customer_region,product_category,payment_method,quantity_sold,total_revenue,price\n\
             2022-05-01,US,Books,Card,1,1.0,1.0\n\
             2022-05-02,US,Books,Card,many,1.0,1.0\n",
        );
        let err = load_file(file.path(), "x").unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"), "{err:#}");
    }

    #[test]
    fn json_records() {
        let file = temp_file(
            ".json",
            r#"[
                {"order_date": "2023-03-04", "customer_region": "Asia", "product_category": "Toys",
                 "payment_method": "UPI", "quantity_sold": 7, "total_revenue": 70.5, "price": 10.07,
                 "rating": 4.1}
            ]"#,
        );
        let ds = load_file(file.path(), "balanced").expect("load json");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].order_year, "2023");
        assert_eq!(ds.records[0].quantity_sold, 7);
    }

    #[test]
    fn parquet_with_integer_and_float_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("order_date", DataType::Utf8, false),
            Field::new("customer_region", DataType::Utf8, false),
            Field::new("product_category", DataType::Utf8, false),
            Field::new("payment_method", DataType::Utf8, false),
            Field::new("quantity_sold", DataType::Int64, false),
            Field::new("total_revenue", DataType::Float64, false),
            Field::new("price", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["2022-01-02", "2023-06-07"])),
                Arc::new(StringArray::from(vec!["Europe", "Asia"])),
                Arc::new(StringArray::from(vec!["Books", "Toys"])),
                Arc::new(StringArray::from(vec!["Cash", "Wallet"])),
                Arc::new(Int64Array::from(vec![2, 5])),
                Arc::new(Float64Array::from(vec![20.0, 12.5])),
                Arc::new(Float64Array::from(vec![10.0, 2.5])),
            ],
        )
        .expect("build batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("create temp file");
        let mut writer =
            ArrowWriter::try_new(file.as_file().try_clone().expect("clone handle"), schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let ds = load_file(file.path(), "parquet").expect("load parquet");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].customer_region, "Asia");
        assert_eq!(ds.records[1].quantity_sold, 5);
        assert_eq!(ds.records[1].price, 2.5);
        assert_eq!(ds.records[0].order_year, "2022");
    }

    #[test]
    fn unsupported_extension() {
        let file = temp_file(".xlsx", "");
        let err = load_file(file.path(), "x").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }
}
