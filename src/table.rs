//! Generic sort and pagination over tabular rows.
//!
//! A [`TableView`] holds the cursor a caller needs to display one table: the
//! column registry, the active sort column and direction, and the current
//! page. It never owns rows; every call takes the rows to view and returns
//! borrowed, reordered slices of them.

use crate::error::{Result, RewardsError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// Page size a new view starts with.
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// Page sizes a view can be switched to.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 15, 20];

/// How a column's values are compared when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Raw values: numbers numerically, text lexically
    Plain,

    /// Values read as numbers; non-numeric text sorts as absent
    Numeric,

    /// Text parsed as a date with the given chrono pattern
    Date(&'static str),
}

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellDisplay {
    #[default]
    Plain,

    /// `$<amount>`, with `$0` for an empty cell
    Currency,
}

/// A column in a table's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
    pub display: CellDisplay,
}

impl Column {
    pub const fn plain(id: &'static str, label: &'static str) -> Self {
        Column {
            id,
            label,
            kind: ColumnKind::Plain,
            display: CellDisplay::Plain,
        }
    }

    pub const fn numeric(id: &'static str, label: &'static str) -> Self {
        Column {
            id,
            label,
            kind: ColumnKind::Numeric,
            display: CellDisplay::Plain,
        }
    }

    pub const fn date(id: &'static str, label: &'static str, pattern: &'static str) -> Self {
        Column {
            id,
            label,
            kind: ColumnKind::Date(pattern),
            display: CellDisplay::Plain,
        }
    }

    /// Renders this column's cells as currency amounts.
    pub const fn currency(self) -> Self {
        Column {
            display: CellDisplay::Currency,
            ..self
        }
    }
}

/// A single cell's raw value.
///
/// The derived ordering is the plain-column ordering: empty cells first,
/// then numbers, then text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue {
    Empty,
    Number(Decimal),
    Text(String),
}

impl CellValue {
    pub fn text(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }

    fn as_number(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(text) => Decimal::from_str(text.trim()).ok(),
            CellValue::Empty => None,
        }
    }

    fn as_date(&self, pattern: &str) -> Option<NaiveDate> {
        match self {
            CellValue::Text(text) => parse_cell_date(text.trim(), pattern),
            _ => None,
        }
    }
}

/// A row that can be displayed in a [`TableView`].
pub trait TableRow {
    /// Returns the value of the cell in `column`, or `Empty` if the row has
    /// no such column.
    fn cell(&self, column: &str) -> CellValue;
}

/// Parses a date cell. Patterns without a day (`%b %Y`) resolve to the 1st.
pub fn parse_cell_date(value: &str, pattern: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, pattern).ok().or_else(|| {
        NaiveDate::parse_from_str(&format!("01 {}", value), &format!("%d {}", pattern)).ok()
    })
}

/// Display text for a cell.
///
/// Currency columns read as `$<amount>` and fall back to `$0`; any other
/// empty cell reads as `-`.
pub fn format_cell(column: &Column, value: &CellValue) -> String {
    match (column.display, value) {
        (CellDisplay::Currency, CellValue::Number(n)) => format!("${}", n),
        (CellDisplay::Currency, CellValue::Text(text)) if !text.is_empty() => format!("${}", text),
        (CellDisplay::Currency, _) => "$0".to_string(),
        (CellDisplay::Plain, CellValue::Empty) => "-".to_string(),
        (CellDisplay::Plain, CellValue::Number(n)) => n.to_string(),
        (CellDisplay::Plain, CellValue::Text(text)) => text.clone(),
    }
}

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Comparable projection of a cell under its column's kind.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Raw(CellValue),
    Number(Option<Decimal>),
    Date(Option<NaiveDate>),
}

impl SortKey {
    fn project(kind: ColumnKind, cell: CellValue) -> Self {
        match kind {
            ColumnKind::Plain => SortKey::Raw(cell),
            ColumnKind::Numeric => SortKey::Number(cell.as_number()),
            ColumnKind::Date(pattern) => SortKey::Date(cell.as_date(pattern)),
        }
    }
}

/// Sort and page state for one displayed table.
///
/// Starts sorted ascending by the first registered column, on page 0 with
/// [`DEFAULT_ROWS_PER_PAGE`] rows per page. State only changes through
/// [`sort_by`](Self::sort_by), [`set_page`](Self::set_page),
/// [`set_rows_per_page`](Self::set_rows_per_page), and
/// [`reset_page`](Self::reset_page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    columns: Vec<Column>,
    order_by: Option<usize>,
    direction: SortDirection,
    page: usize,
    rows_per_page: usize,
}

impl TableView {
    /// Creates a view over the given column registry.
    pub fn new(columns: Vec<Column>) -> Self {
        let order_by = if columns.is_empty() { None } else { Some(0) };
        TableView {
            columns,
            order_by,
            direction: SortDirection::Ascending,
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The active sort column, if the registry has any columns.
    pub fn order_by(&self) -> Option<&Column> {
        self.order_by.map(|idx| &self.columns[idx])
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Selects a sort column.
    ///
    /// Selecting the active column flips the direction; selecting another
    /// column makes it active in ascending order. The page is left alone.
    pub fn sort_by(&mut self, column_id: &str) -> Result<()> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| RewardsError::UnknownColumn(column_id.to_string()))?;

        if self.order_by == Some(idx) {
            self.direction = self.direction.toggled();
        } else {
            self.order_by = Some(idx);
            self.direction = SortDirection::Ascending;
        }
        Ok(())
    }

    /// Moves to a zero-based page. Pages past the end show no rows.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(RewardsError::InvalidPageSize(rows_per_page));
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Ok(())
    }

    /// Returns to the first page without touching the sort state.
    pub fn reset_page(&mut self) {
        self.page = 0;
    }

    /// Number of pages needed for `total_rows` rows.
    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.rows_per_page)
    }

    /// All rows in display order.
    ///
    /// The sort is stable in both directions: rows with equal keys keep
    /// their input order.
    pub fn sorted<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let column = match self.order_by() {
            Some(column) => *column,
            None => return rows.iter().collect(),
        };

        let mut keyed: Vec<(SortKey, &'a R)> = rows
            .iter()
            .map(|row| (SortKey::project(column.kind, row.cell(column.id)), row))
            .collect();

        let direction = self.direction;
        keyed.sort_by(|(a, _), (b, _)| {
            let ordering: Ordering = a.cmp(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        keyed.into_iter().map(|(_, row)| row).collect()
    }

    /// The rows on the current page, in display order.
    pub fn visible_rows<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let start = self.page.saturating_mul(self.rows_per_page);
        self.sorted(rows)
            .into_iter()
            .skip(start)
            .take(self.rows_per_page)
            .collect()
    }
}
