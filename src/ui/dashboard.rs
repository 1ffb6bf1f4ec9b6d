use eframe::egui::{ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::{AppState, Tab};
use crate::ui::{charts, metrics, table};

// ---------------------------------------------------------------------------
// Central panel: title, metrics, tabs
// ---------------------------------------------------------------------------

/// Subtitle naming the span of order years on offer.
pub fn subtitle(state: &AppState) -> String {
    let years = state.options.get(Dimension::Year);
    match (years.first(), years.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("Explore sales data between {first} and {last}")
        }
        (Some(only), _) => format!("Explore sales data for {only}"),
        _ => "Explore sales data".to_string(),
    }
}

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = state
                .status_message
                .as_deref()
                .unwrap_or("No dataset loaded.");
            ui.heading(msg);
        });
        return;
    };

    ui.heading("| Sales Dashboard");
    ui.label(subtitle(state));
    ui.separator();

    metrics::metrics_row(ui, &view.metrics);
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.title());
        }
    });
    ui.separator();

    let state = &*state;
    let Some(view) = &state.view else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.active_tab {
            Tab::Graphs => {
                ui.heading(Tab::Graphs.title());
                charts::panel_charts(ui, "unbalanced", &view.unbalanced, &state.colors);
            }
            Tab::GraphsBalanced => {
                ui.heading(Tab::GraphsBalanced.title());
                charts::panel_charts(ui, "balanced", &view.balanced, &state.colors);
            }
            Tab::DataFrame => {
                ui.heading("Unbalanced Complete Data Frame");
                table::records_table(ui, "unbalanced_table", &view.unbalanced.filtered);
                ui.separator();
                ui.heading("Balanced Complete Data Frame");
                table::records_table(ui, "balanced_table", &view.balanced.filtered);
            }
        });
}
