//! Roster engine - search, filter, sort and paginate in-memory listings.
//!
//! Every directory screen of a membership site (members, players,
//! tournaments, news, media, districts) shows the same kind of table: a
//! search box, a few exact-match filters, sortable headers and a page strip.
//! This crate computes the rows for such a table from a fully loaded
//! collection of records. It holds no state and does no I/O.
//!
//! # Quick Start
//!
//! ```rust
//! use roster_engine::{compute_page, ColumnSpec, FilterState, PageRequest, Row, SortState};
//!
//! let players: Vec<Row> = ["A", "B", "C", "D", "E", "F"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, letter)| {
//!         Row::new()
//!             .with("name", format!("Player {letter}"))
//!             .with("district", if i % 2 == 0 { "Hyderabad" } else { "Warangal" })
//!     })
//!     .collect();
//!
//! let columns = vec![
//!     ColumnSpec::new("name").label("Player").sortable(),
//!     ColumnSpec::new("district").options(["Hyderabad", "Warangal"]),
//! ];
//!
//! let page = compute_page(
//!     &players,
//!     "player",
//!     &FilterState::new().with("district", "Warangal"),
//!     Some(&SortState::desc("name")),
//!     PageRequest::new(1, 2),
//!     &columns,
//! );
//!
//! assert_eq!(page.total_matches, 3);
//! assert_eq!(page.total_pages, 2);
//! assert_eq!(page.summary(), "Showing 1–2 of 3");
//! assert_eq!(page.strip(1).to_string(), "‹ prev | [1] 2 | next ›");
//! ```
//!
//! # Pipeline
//!
//! [`compute_page`] always runs the same four stages:
//!
//! ```text
//! records -> search(query) -> filter(all pairs) -> stable sort -> page slice
//! ```
//!
//! - **Search**: case-insensitive substring over the text of every
//!   searchable field. An empty query matches everything.
//! - **Filter**: exact text equality per field, all pairs must hold.
//! - **Sort**: by one field, ascending or descending. Ties keep input order.
//! - **Paginate**: one-based pages. Pages past the end are empty.
//!
//! # Values
//!
//! | Kind | Text form | Ordering |
//! |------|-----------|----------|
//! | String | as stored | lexicographic |
//! | Number | `42`, `3.5` | numeric across integer and float |
//! | Bool | `true` / `false` | `false < true` |
//! | List | items joined by `", "` | element-wise |
//! | None | empty, never matches | after everything |

mod column;
mod engine;
mod error;
mod filter;
mod ordering;
mod page;
mod record;
mod state;
mod strip;
mod value;

// Re-export public API
pub use column::{find_column, resolve, ColumnSpec, Extractor};
pub use engine::compute_page;
pub use error::{EngineError, Result};
pub use filter::FilterState;
pub use ordering::{Dir, SortState};
pub use page::{total_pages, PageRequest, PageResult, DEFAULT_PAGE_SIZE};
pub use record::{Record, Row, ToValue};
pub use state::TableState;
pub use strip::{PageLink, PageStrip};
pub use value::{compare_values, FieldValue, Number, Value};
