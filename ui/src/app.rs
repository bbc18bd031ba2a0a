use crate::state::{FetchPhase, State};
use crate::widgets;
use crate::widgets::api::{
    CSV_DATA_ERROR_ID, CSV_DATA_RESPONSE_ID, LANGUAGE_ERROR_ID, LANGUAGE_RESPONSE_ID,
};
use seawatch_business::{LanguagePack, Record, TableModel, TableOptions, derive_columns};

pub struct ViewerApp {
    state: State,
}

impl ViewerApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// The page-load initializer: fires the startup requests exactly once,
    /// on the first frame. One GET for the dataset, one for the localized
    /// string bundle.
    fn start_fetches_once(&mut self, ctx: &egui::Context) {
        if self.state.phase != FetchPhase::Idle {
            return;
        }
        self.state.phase = FetchPhase::InFlight;
        widgets::fetch_csv_data(&self.state.api_base_url, ctx.clone());
        widgets::fetch_language(&self.state.api_base_url, ctx.clone());
    }

    /// Poll for async responses and update state. Called every frame.
    ///
    /// When the dataset arrives, this is the only place the table widget
    /// is ever constructed: columns derived from the first record,
    /// pagination and search on, initial sort first column descending.
    /// A failed dataset fetch means no table, ever.
    fn poll_responses(&mut self, ctx: &egui::Context) {
        if let Some(records) = ctx.memory(|mem| {
            mem.data
                .get_temp::<Vec<Record>>(egui::Id::new(CSV_DATA_RESPONSE_ID))
        }) {
            ctx.memory_mut(|mem| {
                mem.data
                    .remove::<Vec<Record>>(egui::Id::new(CSV_DATA_RESPONSE_ID));
            });
            let columns = derive_columns(&records);
            self.state.table = Some(TableModel::new(records, columns, TableOptions::default()));
            self.state.phase = FetchPhase::Loaded;
        }

        if let Some(error) = ctx.memory(|mem| {
            mem.data
                .get_temp::<String>(egui::Id::new(CSV_DATA_ERROR_ID))
        }) {
            ctx.memory_mut(|mem| {
                mem.data.remove::<String>(egui::Id::new(CSV_DATA_ERROR_ID));
            });
            log::error!("csv-data fetch failed: {error}");
            self.state.phase = FetchPhase::Failed;
        }

        if let Some(pack) = ctx.memory(|mem| {
            mem.data
                .get_temp::<LanguagePack>(egui::Id::new(LANGUAGE_RESPONSE_ID))
        }) {
            ctx.memory_mut(|mem| {
                mem.data
                    .remove::<LanguagePack>(egui::Id::new(LANGUAGE_RESPONSE_ID));
            });
            self.state.language = pack;
        }

        if let Some(error) = ctx.memory(|mem| {
            mem.data
                .get_temp::<String>(egui::Id::new(LANGUAGE_ERROR_ID))
        }) {
            ctx.memory_mut(|mem| {
                mem.data.remove::<String>(egui::Id::new(LANGUAGE_ERROR_ID));
            });
            log::warn!("language bundle fetch failed, keeping English defaults: {error}");
        }
    }
}

impl eframe::App for ViewerApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.start_fetches_once(ctx);
        self.poll_responses(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                widgets::fetch_status(self.state.phase, ui);
                widgets::env_version(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Detection Log");
            ui.separator();

            match self.state.phase {
                FetchPhase::Loaded => {
                    if let Some(table) = self.state.table.as_mut() {
                        widgets::csv_table(table, &self.state.language, ui);
                    }
                }
                FetchPhase::Idle | FetchPhase::InFlight => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                }
                FetchPhase::Failed => {
                    // No table and no fallback rendering; the status
                    // indicator in the top panel is the visible signal,
                    // the log line the diagnostic one.
                }
            }
        });
    }
}

#[cfg(test)]
mod viewer_app_tests {
    use super::*;
    use seawatch_business::SortDirection;

    fn app() -> ViewerApp {
        ViewerApp::new(State::new("http://test".to_owned()))
    }

    fn push_records(ctx: &egui::Context, body: &str) {
        let records: Vec<Record> = serde_json::from_str(body).expect("test records");
        ctx.memory_mut(|mem| {
            mem.data
                .insert_temp(egui::Id::new(CSV_DATA_RESPONSE_ID), records);
        });
    }

    #[test]
    fn test_records_response_constructs_the_table() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.state.phase = FetchPhase::InFlight;

        push_records(&ctx, r#"[{"a": 1, "b": 2}, {"a": 3, "b": 4}]"#);
        app.poll_responses(&ctx);

        assert_eq!(app.state.phase, FetchPhase::Loaded);
        let table = app.state.table.as_ref().expect("table should be constructed");
        let titles: Vec<&str> = table.columns().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
        assert_eq!(table.sort(), Some((0, SortDirection::Descending)));
        assert!(table.options().paging);
        assert!(table.options().searching);
        // Descending by "a": the a=3 row comes first.
        let first = table.visible_rows()[0];
        assert_eq!(table.cell(first, 0), &serde_json::json!(3));
    }

    #[test]
    fn test_empty_array_builds_a_table_with_zero_columns() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.state.phase = FetchPhase::InFlight;

        push_records(&ctx, "[]");
        app.poll_responses(&ctx);

        assert_eq!(app.state.phase, FetchPhase::Loaded);
        let table = app.state.table.as_ref().expect("table should be constructed");
        assert!(table.columns().is_empty());
        assert_eq!(table.record_count(), 0);
    }

    #[test]
    fn test_keys_unknown_to_the_first_record_never_become_columns() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.state.phase = FetchPhase::InFlight;

        push_records(&ctx, r#"[{"a": 1}, {"a": 2, "b": 3}]"#);
        app.poll_responses(&ctx);

        let table = app.state.table.as_ref().expect("table should be constructed");
        let titles: Vec<&str> = table.columns().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["a"]);
    }

    #[test]
    fn test_fetch_failure_never_constructs_the_table() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.state.phase = FetchPhase::InFlight;

        ctx.memory_mut(|mem| {
            mem.data.insert_temp(
                egui::Id::new(CSV_DATA_ERROR_ID),
                "connection refused".to_owned(),
            );
        });
        app.poll_responses(&ctx);

        assert_eq!(app.state.phase, FetchPhase::Failed);
        assert!(app.state.table.is_none());
    }

    #[test]
    fn test_response_slot_is_drained_after_polling() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.state.phase = FetchPhase::InFlight;

        push_records(&ctx, r#"[{"a": 1}]"#);
        app.poll_responses(&ctx);

        let drained = ctx.memory(|mem| {
            mem.data
                .get_temp::<Vec<Record>>(egui::Id::new(CSV_DATA_RESPONSE_ID))
        });
        assert!(drained.is_none(), "poll should consume the response slot");
    }

    #[test]
    fn test_language_bundle_replaces_defaults_when_it_arrives() {
        let ctx = egui::Context::default();
        let mut app = app();

        let pack =
            LanguagePack::from_json_bytes(r#"{"search": "検索:"}"#.as_bytes()).expect("bundle parses");
        ctx.memory_mut(|mem| {
            mem.data
                .insert_temp(egui::Id::new(LANGUAGE_RESPONSE_ID), pack);
        });
        app.poll_responses(&ctx);

        assert_eq!(app.state.language.search, "検索:");
        // Fields the bundle left out keep their English defaults.
        assert_eq!(app.state.language.paginate.next, "Next");
    }

    #[test]
    fn test_language_failure_keeps_english_defaults() {
        let ctx = egui::Context::default();
        let mut app = app();

        ctx.memory_mut(|mem| {
            mem.data
                .insert_temp(egui::Id::new(LANGUAGE_ERROR_ID), "timeout".to_owned());
        });
        app.poll_responses(&ctx);

        assert_eq!(app.state.language, LanguagePack::default());
    }

    #[test]
    fn test_initializer_only_fires_from_idle() {
        let ctx = egui::Context::default();
        let mut app = app();

        assert_eq!(app.state.phase, FetchPhase::Idle);
        app.start_fetches_once(&ctx);
        assert_eq!(app.state.phase, FetchPhase::InFlight);

        // Later frames never re-trigger the startup fetch.
        app.state.phase = FetchPhase::Loaded;
        app.start_fetches_once(&ctx);
        assert_eq!(app.state.phase, FetchPhase::Loaded);
    }
}
