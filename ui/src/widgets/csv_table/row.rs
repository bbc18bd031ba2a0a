//! Row rendering for the table widget.

use egui_extras::TableRow;
use seawatch_business::TableModel;

use super::cells::render_value_cell;

/// Renders one data row: a cell per derived column, looked up by the
/// column's accessor. Records missing an accessor render that cell empty.
#[inline]
pub fn render_record_row(model: &TableModel, record_index: usize, row: &mut TableRow<'_, '_>) {
    for column in 0..model.columns().len() {
        row.col(|ui| {
            render_value_cell(ui, model.cell(record_index, column));
        });
    }
}
