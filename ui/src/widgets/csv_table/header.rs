//! Header rendering for the table widget.

use egui::{Button, RichText, Ui};
use egui_extras::TableRow;
use seawatch_business::{SortDirection, TableModel};

/// Renders the header row. Every header is clickable; returns the column
/// whose header was clicked this frame, if any.
#[inline]
pub fn render_table_header(model: &TableModel, header: &mut TableRow<'_, '_>) -> Option<usize> {
    let mut clicked = None;
    for (index, descriptor) in model.columns().iter().enumerate() {
        header.col(|ui| {
            if render_header_cell(ui, &descriptor.title, sort_marker(model, index)) {
                clicked = Some(index);
            }
        });
    }
    clicked
}

fn sort_marker(model: &TableModel, index: usize) -> Option<SortDirection> {
    match model.sort() {
        Some((column, direction)) if column == index => Some(direction),
        _ => None,
    }
}

/// Renders a single header cell as a frameless button with a sort arrow
/// when this column drives the ordering.
#[inline]
fn render_header_cell(ui: &mut Ui, title: &str, marker: Option<SortDirection>) -> bool {
    let label = match marker {
        Some(SortDirection::Ascending) => format!("{title} ⬆"),
        Some(SortDirection::Descending) => format!("{title} ⬇"),
        None => title.to_owned(),
    };
    ui.add(Button::new(RichText::new(label).strong()).frame(false))
        .clicked()
}
