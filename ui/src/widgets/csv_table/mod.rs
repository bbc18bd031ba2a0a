//! The table widget.
//!
//! Rendering is split into smaller, focused components:
//! - `columns`: column sizing and layout constants
//! - `header`: header row with click-to-sort
//! - `row`: individual data rows
//! - `cells`: cell rendering per value type
//! - `controls`: search box and pagination controls
//!
//! The widget renders a [`TableModel`] and feeds interactions (query
//! edits, sort clicks, page changes) straight back into it.

mod cells;
pub mod columns;
pub mod controls;
pub mod header;
pub mod row;

use egui::{Response, Ui};
use egui_extras::TableBuilder;
use seawatch_business::{LanguagePack, TableModel};

/// Renders the full table widget: search box, the table itself, and the
/// pagination strip.
pub fn csv_table(model: &mut TableModel, language: &LanguagePack, ui: &mut Ui) -> Response {
    ui.vertical(|ui| {
        if model.options().searching {
            controls::search_box(model, language, ui);
            ui.add_space(4.0);
        }

        if model.columns().is_empty() {
            // Zero records derived zero columns; nothing to lay out.
            ui.label(&language.empty_table);
            return;
        }

        render_table(model, ui);

        if model.filtered_count() == 0 && model.record_count() > 0 {
            ui.add_space(4.0);
            ui.label(&language.zero_records);
        }

        if model.options().paging {
            ui.add_space(4.0);
            controls::pagination(model, language, ui);
        }
    })
    .response
}

fn render_table(model: &mut TableModel, ui: &mut Ui) {
    let mut sort_request = None;
    let visible: Vec<usize> = model.visible_rows().to_vec();

    {
        let model_view: &TableModel = model;
        TableBuilder::new(ui)
            .striped(true)
            .columns(columns::data_column(), model_view.columns().len())
            .header(columns::HEADER_HEIGHT, |mut header_row| {
                sort_request = header::render_table_header(model_view, &mut header_row);
            })
            .body(|body| {
                body.rows(columns::ROW_HEIGHT, visible.len(), |mut table_row| {
                    let record_index = visible[table_row.index()];
                    row::render_record_row(model_view, record_index, &mut table_row);
                });
            });
    }

    if let Some(column) = sort_request {
        model.toggle_sort(column);
    }
}
