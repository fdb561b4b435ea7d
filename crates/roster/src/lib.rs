//! # Roster - Listings for Directory Screens
//!
//! Roster turns an in-memory collection of records into one page of a
//! listing: search text, exact-match filters, a single sort and one-based
//! pagination, applied in that order. It provides:
//!
//! - The pure listing engine ([`compute_page`]) and its table controls
//! - `#[derive(Record)]` for exposing struct fields by name
//! - YAML view definitions with per-column sort, filter and format settings
//! - Text and JSON rendering of a page with its summary and page strip
//! - A response cache for listing requests ([`cache`])
//! - The `roster` command, listing a JSON file of records
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`engine`] | Values, records, columns, table state, `compute_page` |
//! | [`cache`] | TTL and LRU response cache with prefix invalidation |
//! | `roster-macros` | The `Record` derive |
//!
//! The engine API is re-exported at the crate root.
//!
//! ## Quick Start
//!
//! ```rust
//! use roster::{Record, SortState, TableState};
//!
//! #[derive(Record)]
//! #[record(crate = "roster::engine")]
//! struct Player {
//!     name: String,
//!     district: String,
//!     rating: Option<i64>,
//! }
//!
//! let players = vec![
//!     Player { name: "Player A".into(), district: "Warangal".into(), rating: Some(1510) },
//!     Player { name: "Player B".into(), district: "Hyderabad".into(), rating: None },
//!     Player { name: "Player C".into(), district: "Warangal".into(), rating: Some(1620) },
//! ];
//!
//! let mut table = TableState::new(10).with_sort(SortState::desc("rating"));
//! table.set_filter("district", "Warangal");
//!
//! let page = table.compute(&players, &[]);
//! let names: Vec<_> = page.rows.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["Player C", "Player A"]);
//! assert_eq!(page.summary(), "Showing 1–2 of 2");
//! ```
//!
//! ## Views
//!
//! A [`view::View`] is compiled from YAML and supplies the column specs for
//! rows loaded as [`Row`] maps. See the [`view`] module for the format and
//! [`render`] for output.

pub use roster_cache as cache;
pub use roster_engine as engine;
pub use roster_macros::Record;

pub mod cli;
pub mod render;
pub mod view;

pub use roster_engine::{
    compare_values, compute_page, find_column, resolve, total_pages, ColumnSpec, Dir,
    EngineError, Extractor, FieldValue, FilterState, Number, PageLink, PageRequest,
    PageResult, PageStrip, Record, Row, SortState, TableState, ToValue, Value,
    DEFAULT_PAGE_SIZE,
};
