//! Domain logic for the Seawatch detection-log viewer.
//!
//! Everything in this crate is pure: records and column inference
//! ([`record`]), the table view model ([`table`]), and the localized UI
//! string bundle ([`language`]). Fetching and rendering live in the `ui`
//! crate; log storage lives in `services`.

pub mod language;
pub mod record;
pub mod table;

pub use language::{LanguagePack, Paginate};
pub use record::{ColumnDescriptor, Record, cell_text, derive_columns, parse_records};
pub use seawatch_utils::version_info;
pub use table::{SortDirection, TableModel, TableOptions};
