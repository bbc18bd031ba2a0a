use seawatch_business::{LanguagePack, TableModel};

/// Where the one-shot startup fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Before the first frame fires the request.
    #[default]
    Idle,
    /// Request sent, response not polled yet.
    InFlight,
    /// Records arrived and the table was constructed.
    Loaded,
    /// The fetch rejected; the table was never constructed.
    Failed,
}

/// The main application state.
pub struct State {
    /// Base URL of the log service.
    pub api_base_url: String,
    pub phase: FetchPhase,
    /// The table widget's model. Only ever constructed once, when the
    /// startup fetch delivers; it owns all table state from then on.
    pub table: Option<TableModel>,
    /// UI strings; replaced by the remote bundle when it loads.
    pub language: LanguagePack,
}

impl Default for State {
    fn default() -> Self {
        Self::new(crate::env::BASE_URL.to_owned())
    }
}

impl State {
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            phase: FetchPhase::Idle,
            table: None,
            language: LanguagePack::default(),
        }
    }
}
