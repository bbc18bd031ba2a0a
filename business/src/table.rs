//! The table view model.
//!
//! This is the state the table widget owns after construction: the full
//! dataset, the derived columns, and the interactive view on top of them
//! (free-text search, per-column sort, pagination). The widget in the `ui`
//! crate renders this model and feeds interactions back into it; nothing
//! here touches the network or the screen.

use crate::language::LanguagePack;
use crate::record::{ColumnDescriptor, Record, cell_text};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Construction-time widget configuration.
///
/// The defaults mirror how the viewer always constructs the table:
/// pagination on, free-text search on, initial sort on the first column
/// descending.
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub paging: bool,
    pub searching: bool,
    /// Initial ordering, `(column index, direction)` pairs. Only entries
    /// pointing at an existing column apply.
    pub order: Vec<(usize, SortDirection)>,
    pub page_size: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            paging: true,
            searching: true,
            order: vec![(0, SortDirection::Descending)],
            page_size: 10,
        }
    }
}

/// The table widget's data and view state.
#[derive(Debug, Clone)]
pub struct TableModel {
    records: Vec<Record>,
    columns: Vec<ColumnDescriptor>,
    options: TableOptions,
    query: String,
    sort: Option<(usize, SortDirection)>,
    page: usize,
    /// Indices into `records`, filtered and sorted.
    view: Vec<usize>,
}

impl TableModel {
    /// Bind data, columns and options together. The initial sort from
    /// `options.order` is applied no matter what the data looks like.
    pub fn new(records: Vec<Record>, columns: Vec<ColumnDescriptor>, options: TableOptions) -> Self {
        let sort = options
            .order
            .iter()
            .copied()
            .find(|(col, _)| *col < columns.len());

        let mut model = Self {
            records,
            columns,
            options,
            query: String::new(),
            sort,
            page: 0,
            view: Vec::new(),
        };
        model.rebuild_view();
        model
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn sort(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Total rows before filtering.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Rows surviving the current search query.
    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    /// Update the free-text query and jump back to the first page.
    /// Ignored when the widget was constructed with searching disabled.
    pub fn set_query(&mut self, query: &str) {
        if !self.options.searching || self.query == query {
            return;
        }
        self.query = query.to_owned();
        self.page = 0;
        self.rebuild_view();
    }

    /// Toggle sorting on a column: a fresh column sorts ascending, the
    /// already-sorted column flips direction.
    pub fn toggle_sort(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        self.sort = Some(match self.sort {
            Some((current, direction)) if current == column => (column, direction.flipped()),
            _ => (column, SortDirection::Ascending),
        });
        self.rebuild_view();
    }

    pub fn page_count(&self) -> usize {
        if !self.options.paging {
            return 1;
        }
        self.view.len().div_ceil(self.options.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self) {
        self.page = self.page_count() - 1;
    }

    /// Record indices for the rows the current page shows, filtered and
    /// sorted.
    pub fn visible_rows(&self) -> &[usize] {
        if !self.options.paging {
            return &self.view;
        }
        let start = (self.page * self.options.page_size).min(self.view.len());
        let end = (start + self.options.page_size).min(self.view.len());
        &self.view[start..end]
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Cell value for a record/column pair; a key missing from the record
    /// reads as null (renders empty).
    pub fn cell(&self, record_index: usize, column: usize) -> &Value {
        const NULL: &Value = &Value::Null;
        match (self.records.get(record_index), self.columns.get(column)) {
            (Some(record), Some(descriptor)) => record.get(&descriptor.data).unwrap_or(NULL),
            _ => NULL,
        }
    }

    /// The "Showing X to Y of Z entries" summary line.
    pub fn info_text(&self, language: &LanguagePack) -> String {
        if self.view.is_empty() {
            return language.info_empty.clone();
        }
        let start = self.page * self.options.page_size + 1;
        let end = (start + self.visible_rows().len()).saturating_sub(1);
        language
            .info
            .replace("_START_", &start.to_string())
            .replace("_END_", &end.to_string())
            .replace("_TOTAL_", &self.view.len().to_string())
    }

    fn rebuild_view(&mut self) {
        let mut view: Vec<usize> = (0..self.records.len())
            .filter(|&i| self.row_matches_query(i))
            .collect();

        if let Some((column, direction)) = self.sort {
            // Stable, so equal keys keep their response order.
            view.sort_by(|&a, &b| {
                let ordering = value_cmp(self.cell(a, column), self.cell(b, column));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        self.view = view;
        let last = self.page_count() - 1;
        self.page = self.page.min(last);
    }

    /// Smart search: the query splits on whitespace and every term must
    /// occur, case-insensitively, somewhere in the row's column-bound
    /// cells.
    fn row_matches_query(&self, record_index: usize) -> bool {
        if self.query.trim().is_empty() {
            return true;
        }
        let cells: Vec<String> = (0..self.columns.len())
            .map(|c| cell_text(self.cell(record_index, c)).to_lowercase())
            .collect();
        self.query
            .split_whitespace()
            .all(|term| {
                let term = term.to_lowercase();
                cells.iter().any(|cell| cell.contains(&term))
            })
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Ordering across the scalar types a cell can hold: null < bool < number
/// < string; numbers compare numerically, strings case-insensitively.
fn value_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NEG_INFINITY);
            let y = y.as_f64().unwrap_or(f64::NEG_INFINITY);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
