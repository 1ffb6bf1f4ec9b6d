use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::{GroupedBars, PieSlice};
use crate::data::model::{Dimension, Measure};
use crate::data::pipeline::{BarChartSpec, PanelData};

/// Inner radius of the pie as a fraction of the outer radius.
const PIE_HOLE: f32 = 0.3;
/// Share of one x slot taken by a group of bars.
const BAR_GROUP_WIDTH: f64 = 0.8;
const CHART_HEIGHT: f32 = 320.0;

pub const NO_DATA: &str = "There is no data available for this graph";

fn no_data(ui: &mut Ui) {
    let color = ui.visuals().warn_fg_color;
    ui.colored_label(color, NO_DATA);
}

// ---------------------------------------------------------------------------
// Chart grid for one dataset
// ---------------------------------------------------------------------------

/// Render the pie and the three grouped bar charts in a 2 x 2 grid.
pub fn panel_charts(
    ui: &mut Ui,
    id: &str,
    panel: &PanelData,
    colors: &BTreeMap<Dimension, ColorMap>,
) {
    ui.label("Hover a slice or bar to see its exact value.");
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        category_pie(&mut cols[0], &panel.category_slices, colors.get(&Dimension::Category));
        if let Some((spec, bars)) = panel.bars.first() {
            grouped_bar_chart(&mut cols[1], id, spec, bars, colors.get(&spec.series));
        }
    });

    ui.add_space(12.0);

    ui.columns(2, |cols: &mut [Ui]| {
        for (col, (spec, bars)) in cols.iter_mut().zip(panel.bars.iter().skip(1)) {
            grouped_bar_chart(col, id, spec, bars, colors.get(&spec.series));
        }
    });
}

// ---------------------------------------------------------------------------
// Donut pie: quantity sold per product category
// ---------------------------------------------------------------------------

/// Index of the slice covering `turn` (fraction of a full turn, clockwise from the top).
pub fn slice_at(slices: &[PieSlice], turn: f64) -> Option<usize> {
    let mut end = 0.0;
    for (i, slice) in slices.iter().enumerate() {
        end += slice.fraction;
        if turn < end {
            return Some(i);
        }
    }
    None
}

fn point_at(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + vec2(angle.cos(), angle.sin()) * radius
}

pub fn category_pie(ui: &mut Ui, slices: &[PieSlice], colors: Option<&ColorMap>) {
    ui.strong("Product Category Sales");
    if slices.is_empty() {
        no_data(ui);
        return;
    }

    let (rect, response) =
        ui.allocate_exact_size(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    let diameter = rect.height().min(rect.width() * 0.55);
    let outer = diameter * 0.45;
    let inner = outer * PIE_HOLE;
    let center = pos2(rect.left() + diameter / 2.0, rect.center().y);
    let color_of = |label: &str| {
        colors
            .map(|c| c.color_for(label))
            .unwrap_or(Color32::LIGHT_BLUE)
    };

    // Angles grow clockwise on screen since y points down.
    let mut start = -FRAC_PI_2;
    for slice in slices {
        let sweep = slice.fraction as f32 * TAU;
        let color = color_of(&slice.label);
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    point_at(center, inner, a0),
                    point_at(center, outer, a0),
                    point_at(center, outer, a1),
                    point_at(center, inner, a1),
                ],
                color,
                Stroke::NONE,
            ));
        }
        if slice.fraction >= 0.04 {
            painter.text(
                point_at(center, (inner + outer) / 2.0, start + sweep / 2.0),
                Align2::CENTER_CENTER,
                format!("{:.1}%", slice.fraction * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }

    // Legend: label, value, percentage.
    let legend_x = center.x + outer + 16.0;
    let mut y = rect.top() + 12.0;
    for slice in slices {
        painter.rect_filled(
            Rect::from_min_size(pos2(legend_x, y), vec2(10.0, 10.0)),
            2.0,
            color_of(&slice.label),
        );
        painter.text(
            pos2(legend_x + 16.0, y + 5.0),
            Align2::LEFT_CENTER,
            format!(
                "{}  {}  ({:.1}%)",
                slice.label,
                slice.value,
                slice.fraction * 100.0
            ),
            FontId::proportional(12.0),
            text_color,
        );
        y += 18.0;
    }

    if let Some(pos) = response.hover_pos() {
        let offset = pos - center;
        let dist = offset.length();
        if dist >= inner && dist <= outer {
            let angle = (offset.y.atan2(offset.x) + FRAC_PI_2).rem_euclid(TAU);
            if let Some(slice) = slice_at(slices, (angle / TAU) as f64).map(|i| &slices[i]) {
                response.on_hover_text(format!(
                    "{}: {}\n{}: {}",
                    Dimension::Category.label(),
                    slice.label,
                    Measure::QuantitySold.label(),
                    slice.value
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped bar charts
// ---------------------------------------------------------------------------

/// Horizontal offset of series `k` of `n` inside its x slot.
pub fn bar_offset(k: usize, n: usize, width: f64) -> f64 {
    (k as f64 - (n as f64 - 1.0) / 2.0) * width
}

/// Axis label for an x grid mark: the category at integer positions, nothing in between.
pub fn category_tick(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

pub fn grouped_bar_chart(
    ui: &mut Ui,
    id: &str,
    spec: &BarChartSpec,
    bars: &GroupedBars,
    colors: Option<&ColorMap>,
) {
    ui.strong(spec.title);
    if bars.is_empty() {
        no_data(ui);
        return;
    }

    let n_series = bars.series.len().max(1);
    let width = BAR_GROUP_WIDTH / n_series as f64;
    let labels = bars.x_labels.clone();

    Plot::new(format!("{id}_{}", spec.id))
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x.label())
        .y_axis_label(spec.y_label)
        .x_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
        .include_y(0.0)
        .include_y(bars.max_count() as f64 * 1.1)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (k, (name, counts)) in bars.series.iter().enumerate() {
                let offset = bar_offset(k, n_series, width);
                let color = colors
                    .map(|c| c.color_for(name))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let series_bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0)
                    .map(|(i, &count)| {
                        Bar::new(i as f64 + offset, count as f64)
                            .width(width)
                            .name(format!("{name} / {}", bars.x_labels[i]))
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(series_bars).name(name).color(color));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices(fractions: &[f64]) -> Vec<PieSlice> {
        fractions
            .iter()
            .enumerate()
            .map(|(i, &fraction)| PieSlice {
                label: format!("s{i}"),
                value: fraction * 100.0,
                fraction,
            })
            .collect()
    }

    #[test]
    fn slice_lookup_by_turn() {
        let s = slices(&[0.5, 0.25, 0.25]);
        assert_eq!(slice_at(&s, 0.0), Some(0));
        assert_eq!(slice_at(&s, 0.6), Some(1));
        assert_eq!(slice_at(&s, 0.99), Some(2));
        assert_eq!(slice_at(&s, 1.5), None);
    }

    #[test]
    fn bar_offsets_are_centered() {
        let width = BAR_GROUP_WIDTH / 4.0;
        let offsets: Vec<f64> = (0..4).map(|k| bar_offset(k, 4, width)).collect();
        assert!((offsets.iter().sum::<f64>()).abs() < 1e-12);
        assert!((offsets[3] - offsets[0] - 3.0 * width).abs() < 1e-12);
        assert_eq!(bar_offset(0, 1, 0.8), 0.0);
    }

    #[test]
    fn ticks_only_at_integer_positions() {
        let labels = vec!["Asia".to_string(), "Europe".to_string()];
        assert_eq!(category_tick(&labels, 0.0), "Asia");
        assert_eq!(category_tick(&labels, 1.0), "Europe");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, 2.0), "");
        assert_eq!(category_tick(&labels, -1.0), "");
    }
}
