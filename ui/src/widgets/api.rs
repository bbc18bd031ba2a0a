//! Startup fetches for the viewer.
//!
//! Both fetches fire once on the first frame. Results are posted into the
//! egui context's temp memory and picked up by the app's per-frame poll;
//! the callbacks never touch application state directly.

use seawatch_business::{LanguagePack, Record, parse_records};

/// Temp-memory slot for the fetched record array.
pub const CSV_DATA_RESPONSE_ID: &str = "csv_data_response";
/// Temp-memory slot for a failed record fetch.
pub const CSV_DATA_ERROR_ID: &str = "csv_data_error";
/// Temp-memory slot for the fetched language bundle.
pub const LANGUAGE_RESPONSE_ID: &str = "language_response";
/// Temp-memory slot for a failed language fetch.
pub const LANGUAGE_ERROR_ID: &str = "language_error";

/// Fetch the merged detection log.
pub fn fetch_csv_data(api_base_url: &str, ctx: egui::Context) {
    let url = format!("{api_base_url}/csv-data");
    let request = ehttp::Request::get(&url);

    ehttp::fetch(request, move |result| {
        ctx.request_repaint();
        match result {
            Ok(response) => {
                if response.status == 200 {
                    match parse_records(&response.bytes) {
                        Ok(records) => {
                            ctx.memory_mut(|mem| {
                                mem.data.insert_temp::<Vec<Record>>(
                                    egui::Id::new(CSV_DATA_RESPONSE_ID),
                                    records,
                                );
                            });
                        }
                        Err(err) => {
                            ctx.memory_mut(|mem| {
                                mem.data.insert_temp(
                                    egui::Id::new(CSV_DATA_ERROR_ID),
                                    format!("malformed response body: {err}"),
                                );
                            });
                        }
                    }
                } else {
                    ctx.memory_mut(|mem| {
                        mem.data.insert_temp(
                            egui::Id::new(CSV_DATA_ERROR_ID),
                            format!("API returned status: {}", response.status),
                        );
                    });
                }
            }
            Err(err) => {
                ctx.memory_mut(|mem| {
                    mem.data
                        .insert_temp(egui::Id::new(CSV_DATA_ERROR_ID), err.to_string());
                });
            }
        }
    });
}

/// Fetch the localized UI string bundle.
pub fn fetch_language(api_base_url: &str, ctx: egui::Context) {
    let url = format!("{api_base_url}/i18n/ja.json");
    let request = ehttp::Request::get(&url);

    ehttp::fetch(request, move |result| {
        ctx.request_repaint();
        match result {
            Ok(response) => {
                if response.status == 200 {
                    match LanguagePack::from_json_bytes(&response.bytes) {
                        Ok(pack) => {
                            ctx.memory_mut(|mem| {
                                mem.data
                                    .insert_temp(egui::Id::new(LANGUAGE_RESPONSE_ID), pack);
                            });
                        }
                        Err(err) => {
                            ctx.memory_mut(|mem| {
                                mem.data.insert_temp(
                                    egui::Id::new(LANGUAGE_ERROR_ID),
                                    format!("malformed language bundle: {err}"),
                                );
                            });
                        }
                    }
                } else {
                    ctx.memory_mut(|mem| {
                        mem.data.insert_temp(
                            egui::Id::new(LANGUAGE_ERROR_ID),
                            format!("API returned status: {}", response.status),
                        );
                    });
                }
            }
            Err(err) => {
                ctx.memory_mut(|mem| {
                    mem.data
                        .insert_temp(egui::Id::new(LANGUAGE_ERROR_ID), err.to_string());
                });
            }
        }
    });
}
