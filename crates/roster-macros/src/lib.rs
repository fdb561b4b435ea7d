//! Proc macros for Roster.
//!
//! - [`Record`] - Expose a struct's fields to the listing engine
//!
//! For working examples, see `roster/tests/record_derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for listing structs.
///
/// Every named field becomes a record field that the engine can search,
/// filter and sort on. Field values are produced by `roster_engine::ToValue`,
/// which covers strings, numbers, booleans, `Option<T>` and `Vec<T>`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Leave the field out of the record |
/// | `rename = "..."` | Use a custom field name |
/// | `display` | Expose the field's `Display` text as a string value |
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `crate = "..."` | Path to the engine crate, `::roster_engine` by default. Crates that only depend on `roster` use `crate = "roster::engine"` |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Player::NAME`, `Player::DISTRICT`)
/// 2. Implementation of `Record::field()` and `Record::field_names()`
///
/// # Example
///
/// ```ignore
/// use roster_engine::{compute_page, ColumnSpec, FilterState, PageRequest, SortState};
/// use roster_macros::Record;
///
/// #[derive(Record)]
/// struct Player {
///     name: String,
///     district: String,
///     rating: Option<u32>,
///
///     #[record(display)]
///     category: Category,
///
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let page = compute_page(
///     &players,
///     "",
///     &FilterState::new().with(Player::DISTRICT, "Warangal"),
///     Some(&SortState::desc(Player::RATING)),
///     PageRequest::new(1, 10),
///     &Vec::<ColumnSpec<Player>>::new(),
/// );
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
