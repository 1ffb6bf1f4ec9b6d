use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::SummaryMetrics;

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Insert `,` every three digits from the right of a plain digit string.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with thousands separators, e.g. `$1,234,568`.
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&rounded))
}

/// The four cards, as `(label, formatted value)`.
pub fn metric_cards(metrics: &SummaryMetrics) -> [(&'static str, String); 4] {
    [
        (
            "Total of Items Sold",
            group_thousands(&metrics.total_quantity.to_string()),
        ),
        ("Total Revenue (USD)", format_currency(metrics.total_revenue)),
        ("Lowest Product Price", format_currency(metrics.min_price)),
        ("Highest Product Price", format_currency(metrics.max_price)),
    ]
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

pub fn metrics_row(ui: &mut Ui, metrics: &SummaryMetrics) {
    ui.heading("General Metrics");
    ui.add_space(4.0);

    let cards = metric_cards(metrics);
    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(cards.iter()) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(*label).weak());
                ui.label(RichText::new(value).size(26.0).strong());
            });
        }
    });
}
