//! Per-view column configuration.
//!
//! A [`ColumnSpec`] marks one field as sortable, filterable and/or
//! searchable, and may carry an extractor that derives the value the engine
//! matches and sorts on from the whole record. Columns without an extractor,
//! and fields without a column, use the record's raw stored value.

use std::fmt;
use std::sync::Arc;

use crate::record::Record;
use crate::value::Value;

/// Extractor function producing the comparable value of a column.
pub type Extractor<R> = Arc<dyn for<'a> Fn(&'a R) -> Value<'a> + Send + Sync>;

/// Configuration of one column of a listing.
///
/// # Example
///
/// ```
/// use roster_engine::{ColumnSpec, Row, Value};
///
/// let columns: Vec<ColumnSpec<Row>> = vec![
///     ColumnSpec::new("name").label("Player").sortable(),
///     ColumnSpec::new("district")
///         .options(["Hyderabad", "Warangal"])
///         .searchable(false),
///     ColumnSpec::new("initial").extract(|row: &Row| {
///         let name = row.get("name").map(|v| v.as_value().to_string()).unwrap_or_default();
///         Value::from(name.chars().next().map(String::from).unwrap_or_default())
///     }),
/// ];
///
/// assert!(columns[1].is_filterable());
/// assert!(!columns[1].is_searchable());
/// assert_eq!(columns[0].display_label(), "Player");
/// ```
pub struct ColumnSpec<R> {
    field: String,
    label: Option<String>,
    sortable: bool,
    filterable: bool,
    searchable: bool,
    options: Vec<String>,
    extractor: Option<Extractor<R>>,
}

impl<R> ColumnSpec<R> {
    /// Creates a column for `field`. New columns are searchable but neither
    /// sortable nor filterable.
    pub fn new(field: impl Into<String>) -> Self {
        ColumnSpec {
            field: field.into(),
            label: None,
            sortable: false,
            filterable: false,
            searchable: true,
            options: Vec::new(),
            extractor: None,
        }
    }

    /// Sets the column header label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Marks the column as filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Sets whether free-text search looks at this column.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Declares the fixed option list of a filterable column.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable = true;
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the extractor that produces this column's value from a record.
    pub fn extract<F>(mut self, extractor: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> Value<'a> + Send + Sync + 'static,
    {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// The field this column describes.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The header label, if one was set.
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The header label, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field)
    }

    /// Returns `true` if the column can be sorted on.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns `true` if the column can be filtered on.
    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Returns `true` if free-text search includes this column.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// The fixed option list (empty if the column accepts any value).
    pub fn get_options(&self) -> &[String] {
        &self.options
    }

    /// Returns `true` if this column carries an extractor.
    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }
}

impl<R: Record> ColumnSpec<R> {
    /// Produces this column's value for a record.
    pub fn value<'a>(&self, record: &'a R) -> Value<'a> {
        match &self.extractor {
            Some(extract) => extract(record),
            None => record.field(&self.field),
        }
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        ColumnSpec {
            field: self.field.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            searchable: self.searchable,
            options: self.options.clone(),
            extractor: self.extractor.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("searchable", &self.searchable)
            .field("options", &self.options)
            .field("extractor", &self.extractor.is_some())
            .finish()
    }
}

/// Finds the column describing `field`.
pub fn find_column<'c, R>(columns: &'c [ColumnSpec<R>], field: &str) -> Option<&'c ColumnSpec<R>> {
    columns.iter().find(|column| column.field == field)
}

/// Resolves the value of `field` for a record: through the matching column's
/// extractor when there is one, else the raw stored value.
pub fn resolve<'a, R: Record>(record: &'a R, field: &str, columns: &[ColumnSpec<R>]) -> Value<'a> {
    match find_column(columns, field) {
        Some(column) => column.value(record),
        None => record.field(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Row;
    use crate::value::Number;

    fn player() -> Row {
        Row::new()
            .with("first", "Sai")
            .with("last", "Kiran")
            .with("runs", 412i64)
    }

    #[test]
    fn defaults() {
        let column: ColumnSpec<Row> = ColumnSpec::new("name");
        assert!(!column.is_sortable());
        assert!(!column.is_filterable());
        assert!(column.is_searchable());
        assert!(!column.has_extractor());
        assert_eq!(column.display_label(), "name");
    }

    #[test]
    fn options_imply_filterable() {
        let column: ColumnSpec<Row> = ColumnSpec::new("status").options(["active", "lapsed"]);
        assert!(column.is_filterable());
        assert_eq!(column.get_options(), ["active", "lapsed"]);
    }

    #[test]
    fn resolve_prefers_extractor() {
        let columns = vec![ColumnSpec::new("full_name").extract(|row: &Row| {
            Value::from(format!("{} {}", row.field("first"), row.field("last")))
        })];
        let row = player();

        assert_eq!(resolve(&row, "full_name", &columns), Value::from("Sai Kiran"));
        assert_eq!(resolve(&row, "runs", &columns), Value::Number(Number::I64(412)));
        assert_eq!(resolve(&row, "nope", &columns), Value::None);
    }

    #[test]
    fn column_without_extractor_reads_raw_field() {
        let columns: Vec<ColumnSpec<Row>> = vec![ColumnSpec::new("last").sortable()];
        assert_eq!(resolve(&player(), "last", &columns), Value::from("Kiran"));
    }

    #[test]
    fn clone_shares_extractor() {
        let column = ColumnSpec::new("x").extract(|_: &Row| Value::Bool(true));
        let copy = column.clone();
        assert_eq!(copy.value(&Row::new()), Value::Bool(true));
        assert!(format!("{:?}", copy).contains("extractor: true"));
    }
}
