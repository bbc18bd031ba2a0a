//! Search box and pagination controls for the table widget.

use egui::{Button, Ui};
use seawatch_business::{LanguagePack, TableModel};

/// Free-text search bound to the model's query.
#[inline]
pub fn search_box(model: &mut TableModel, language: &LanguagePack, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(&language.search);
        let mut query = model.query().to_owned();
        if ui.text_edit_singleline(&mut query).changed() {
            model.set_query(&query);
        }
    });
}

/// Info line plus previous/next page buttons, labeled from the language
/// pack.
#[inline]
pub fn pagination(model: &mut TableModel, language: &LanguagePack, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(model.info_text(language));
        ui.separator();

        let on_first = model.current_page() == 0;
        if ui
            .add_enabled(!on_first, Button::new(&language.paginate.previous))
            .clicked()
        {
            model.previous_page();
        }

        ui.label(format!("{} / {}", model.current_page() + 1, model.page_count()));

        let on_last = model.current_page() + 1 >= model.page_count();
        if ui
            .add_enabled(!on_last, Button::new(&language.paginate.next))
            .clicked()
        {
            model.next_page();
        }
    });
}
