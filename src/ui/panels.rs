use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.datasets.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                // Clone so we can mutate state inside the loop.
                let all_values: Vec<String> = state.options.get(dim).iter().cloned().collect();

                // Show count of selected / total in the header
                let n_selected = state.selections.get(dim).len();
                let header_text = format!("{}  ({n_selected}/{})", dim.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        ui.horizontal_wrapped(|ui: &mut Ui| {
                            for val in &all_values {
                                let is_selected = state.selections.is_selected(dim, val);

                                // Colour the pill when the dimension is a chart series
                                let mut text = RichText::new(val);
                                if matches!(dim, Dimension::Category | Dimension::PaymentMethod) {
                                    if let Some(cm) = state.color_map(dim) {
                                        text = text.color(cm.color_for(val));
                                    }
                                }

                                if ui.selectable_label(is_selected, text).clicked() {
                                    state.toggle_filter_value(dim, val);
                                }
                            }
                        });
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("View", |ui: &mut Ui| {
            for tab in Tab::ALL {
                if ui
                    .selectable_label(state.active_tab == tab, tab.title())
                    .clicked()
                {
                    state.active_tab = tab;
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.datasets, &state.view) {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.unbalanced.len() + ds.balanced.len(),
                view.visible_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
