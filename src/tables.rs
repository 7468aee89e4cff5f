use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{
    bundle::{Metric, MetricBundle},
    texts,
};

#[must_use]
pub fn build_bundle_table(bundle: &MetricBundle) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Metric", "Value", "Sentence"]);
    for metric in bundle.metrics() {
        table.add_row(vec![
            Cell::new(metric.key.friendly_name()).add_attribute(Attribute::Dim),
            build_value_cell(metric),
            Cell::new(metric.text.as_deref().unwrap_or_default()),
        ]);
    }
    table
}

fn build_value_cell(metric: &Metric) -> Cell {
    match metric.value {
        Some(value) => {
            let rendered = match metric.key.unit_symbol() {
                Some(unit) => format!("{} {unit}", texts::display_value(metric.key, value)),
                None => texts::display_value(metric.key, value),
            };
            Cell::new(rendered).set_alignment(CellAlignment::Right)
        }
        None => Cell::new("n/a")
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim)
            .fg(Color::DarkGrey),
    }
}
