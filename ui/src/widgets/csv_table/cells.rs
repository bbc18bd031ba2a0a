//! Cell rendering for the table widget.

use egui::{RichText, Ui};
use seawatch_business::cell_text;
use serde_json::Value;

/// Renders a single cell. Numbers render monospace so columns of
/// coordinates line up; everything else is plain text. Null is an empty
/// cell.
#[inline]
pub fn render_value_cell(ui: &mut Ui, value: &Value) {
    match value {
        Value::Null => {}
        Value::Number(_) => {
            ui.label(RichText::new(cell_text(value).as_ref()).monospace());
        }
        _ => {
            ui.label(cell_text(value).as_ref());
        }
    }
}
