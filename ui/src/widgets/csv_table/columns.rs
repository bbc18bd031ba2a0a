//! Column sizing for the table widget.

use egui_extras::Column;

pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 26.0;

/// Columns are derived from the data at runtime, so every one gets the
/// same flexible layout instead of per-column widths.
#[inline]
pub fn data_column() -> Column {
    Column::remainder().at_least(60.0).clip(true)
}
