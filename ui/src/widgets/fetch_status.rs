use crate::state::FetchPhase;
use egui::{Color32, Response, Ui};

/// Status indicator for the one-shot startup fetch.
pub fn fetch_status(phase: FetchPhase, ui: &mut Ui) -> Response {
    let (color, text) = match phase {
        FetchPhase::Idle | FetchPhase::InFlight => (Color32::GRAY, "● fetching"),
        FetchPhase::Loaded => (Color32::from_rgb(34, 139, 34), "● loaded"),
        FetchPhase::Failed => (Color32::RED, "● failed"),
    };
    ui.colored_label(color, text)
}
