use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{SalesDataset, SalesRecord};

pub const COLUMNS: [&str; 8] = [
    "order_date",
    "order_year",
    "customer_region",
    "product_category",
    "payment_method",
    "quantity_sold",
    "price",
    "total_revenue",
];

/// Cell texts of one row, aligned with [`COLUMNS`].
pub fn row_cells(rec: &SalesRecord) -> [String; 8] {
    [
        rec.order_date.clone(),
        rec.order_year.clone(),
        rec.customer_region.clone(),
        rec.product_category.clone(),
        rec.payment_method.clone(),
        rec.quantity_sold.to_string(),
        format!("{:.2}", rec.price),
        format!("{:.2}", rec.total_revenue),
    ]
}

/// Scrollable table of every record in `dataset`.
pub fn records_table(ui: &mut Ui, id: &str, dataset: &SalesDataset) {
    ui.label(format!("{} rows", dataset.len()));
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(320.0)
            .columns(Column::auto().at_least(80.0), COLUMNS.len())
            .header(20.0, |mut header| {
                for name in COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, dataset.len(), |mut row| {
                    let rec = &dataset.records[row.index()];
                    for cell in row_cells(rec) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_column_order() {
        let rec = SalesRecord::new("2022-05-01", "US", "Electronics", "Card", 3, 30.0, 10.0);
        let cells = row_cells(&rec);
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[1], "2022");
        assert_eq!(cells[5], "3");
        assert_eq!(cells[6], "10.00");
        assert_eq!(cells[7], "30.00");
    }
}
