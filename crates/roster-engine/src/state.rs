//! Caller-side holder for the controls of one listing screen.

use serde::{Deserialize, Serialize};

use crate::column::ColumnSpec;
use crate::engine::compute_page;
use crate::filter::FilterState;
use crate::ordering::{Dir, SortState};
use crate::page::{PageRequest, PageResult, DEFAULT_PAGE_SIZE};
use crate::record::Record;

/// The current search box, filter selections, sort header and page of a
/// listing.
///
/// [`compute_page`] never touches the page number on its own. `TableState`
/// moves back to page 1 whenever the query, a filter or the page size
/// changes, so the user is never left on a page that no longer exists.
///
/// ```
/// use roster_engine::{ColumnSpec, Dir, Row, TableState};
///
/// let rows: Vec<Row> = (1..=25)
///     .map(|n| Row::new().with("name", format!("Player {n:02}")))
///     .collect();
/// let columns: Vec<ColumnSpec<Row>> = vec![ColumnSpec::new("name").sortable()];
///
/// let mut state = TableState::new(10);
/// state.set_page(3);
/// assert_eq!(state.compute(&rows, &columns).len(), 5);
///
/// state.toggle_sort("name");
/// assert_eq!(state.page().page, 1);
/// assert_eq!(state.sort().map(|s| s.dir), Some(Dir::Asc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    query: String,
    filters: FilterState,
    sort: Option<SortState>,
    page: PageRequest,
}

impl TableState {
    /// Creates a state showing the first page at `page_size` rows.
    pub fn new(page_size: usize) -> Self {
        TableState {
            query: String::new(),
            filters: FilterState::new(),
            sort: None,
            page: PageRequest::first(page_size),
        }
    }

    /// Starts from an initial sort, as a view's default ordering.
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// The free-text query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The active filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// The requested page.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Replaces the query and returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.reset_page();
    }

    /// Requires `field` to equal `value` and returns to the first page.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filters.set(field, value);
        self.reset_page();
    }

    /// Drops the constraint on `field` and returns to the first page.
    pub fn clear_filter(&mut self, field: &str) {
        self.filters.remove(field);
        self.reset_page();
    }

    /// Drops every filter and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.reset_page();
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page = PageRequest::first(size);
    }

    /// Moves to another page, keeping everything else.
    pub fn set_page(&mut self, page: usize) {
        self.page = self.page.with_page(page);
    }

    /// Header click on `field`: ascending, then descending, then unsorted.
    /// Clicking a different field starts over at ascending. Returns to the
    /// first page.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.field == field => match current.dir {
                Dir::Asc => Some(SortState::desc(field)),
                Dir::Desc => None,
            },
            _ => Some(SortState::asc(field)),
        };
        self.reset_page();
    }

    /// Runs the engine over `records` with the current controls.
    pub fn compute<'r, R: Record>(
        &self,
        records: &'r [R],
        columns: &[ColumnSpec<R>],
    ) -> PageResult<&'r R> {
        compute_page(
            records,
            &self.query,
            &self.filters,
            self.sort.as_ref(),
            self.page,
            columns,
        )
    }

    fn reset_page(&mut self) {
        self.page = self.page.with_page(1);
    }
}

impl Default for TableState {
    fn default() -> Self {
        TableState::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> TableState {
        let mut state = TableState::new(10);
        state.set_page(3);
        state
    }

    #[test]
    fn query_resets_page() {
        let mut state = on_page_three();
        state.set_query("kiran");
        assert_eq!(state.page(), PageRequest::new(1, 10));
        assert_eq!(state.query(), "kiran");
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut state = on_page_three();
        state.set_filter("district", "Warangal");
        assert_eq!(state.page().page, 1);
        assert_eq!(state.filters().get("district"), Some("Warangal"));

        state.set_page(2);
        state.clear_filter("district");
        assert_eq!(state.page().page, 1);
        assert!(state.filters().is_empty());

        state.set_filter("status", "active");
        state.set_page(4);
        state.clear_filters();
        assert_eq!(state.page().page, 1);
        assert!(state.filters().is_empty());
    }

    #[test]
    fn page_size_resets_page() {
        let mut state = on_page_three();
        state.set_page_size(25);
        assert_eq!(state.page(), PageRequest::new(1, 25));
    }

    #[test]
    fn set_page_keeps_controls() {
        let mut state = TableState::default().with_sort(SortState::desc("rating"));
        state.set_query("a");
        state.set_page(2);
        assert_eq!(state.page(), PageRequest::new(2, DEFAULT_PAGE_SIZE));
        assert_eq!(state.query(), "a");
        assert_eq!(state.sort(), Some(&SortState::desc("rating")));
    }

    #[test]
    fn toggle_sort_cycles() {
        let mut state = on_page_three();
        state.toggle_sort("name");
        assert_eq!(state.sort(), Some(&SortState::asc("name")));
        assert_eq!(state.page().page, 1);

        state.toggle_sort("name");
        assert_eq!(state.sort(), Some(&SortState::desc("name")));

        state.toggle_sort("name");
        assert_eq!(state.sort(), None);

        state.toggle_sort("name");
        state.toggle_sort("rating");
        assert_eq!(state.sort(), Some(&SortState::asc("rating")));
    }
}
