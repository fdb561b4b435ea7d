//! The listing pipeline: search, filter, sort, paginate.

use crate::column::{find_column, resolve, ColumnSpec};
use crate::filter::FilterState;
use crate::ordering::SortState;
use crate::page::{total_pages, PageRequest, PageResult};
use crate::record::Record;
use crate::value::{compare_values, Value};

/// Computes one page of a listing.
///
/// The stages always run in this order:
///
/// 1. **Search**: with a non-empty `query`, a record survives if the
///    lowercased text of any searchable field contains the lowercased query.
/// 2. **Filter**: every `(field, value)` pair in `filters` must equal the
///    text of the record's field exactly. A missing field never matches.
/// 3. **Sort**: survivors are ordered by the value of `sort.field`. The sort
///    is stable, so records with equal keys keep their input order.
/// 4. **Paginate**: the requested page is sliced out of the sorted
///    survivors. A page past the end is empty but still reports the totals.
///
/// Field values are resolved through the matching column's extractor when
/// one exists, otherwise the record's stored value is used.
///
/// `page.page` and `page.size` must be at least 1, and `sort.field` must name
/// a column or a record field. Both are caller errors that panic in debug
/// builds; in release builds an unknown sort field leaves the order as is.
/// An empty collection yields an empty result.
///
/// # Example
///
/// ```
/// use roster_engine::{compute_page, ColumnSpec, FilterState, PageRequest, Row, SortState};
///
/// let rows = vec![
///     Row::new().with("name", "Player C").with("district", "Warangal"),
///     Row::new().with("name", "Player A").with("district", "Warangal"),
///     Row::new().with("name", "Player B").with("district", "Hyderabad"),
/// ];
/// let columns: Vec<ColumnSpec<Row>> = vec![];
///
/// let page = compute_page(
///     &rows,
///     "",
///     &FilterState::new().with("district", "Warangal"),
///     Some(&SortState::asc("name")),
///     PageRequest::new(1, 10),
///     &columns,
/// );
///
/// assert_eq!(page.total_matches, 2);
/// assert_eq!(page.rows[0].get("name").map(|v| v.as_value().to_string()), Some("Player A".into()));
/// ```
pub fn compute_page<'r, R: Record>(
    records: &'r [R],
    query: &str,
    filters: &FilterState,
    sort: Option<&SortState>,
    page: PageRequest,
    columns: &[ColumnSpec<R>],
) -> PageResult<&'r R> {
    debug_assert!(page.page >= 1, "page numbers start at 1, got {}", page.page);
    debug_assert!(page.size >= 1, "page size must be at least 1, got {}", page.size);

    let needle = query.to_lowercase();
    let mut survivors: Vec<&'r R> = records
        .iter()
        .filter(|record| needle.is_empty() || matches_query(*record, &needle, columns))
        .filter(|record| matches_filters(*record, filters, columns))
        .collect();

    if let Some(sort) = sort {
        sort_records(&mut survivors, sort, columns);
    }

    let total_matches = survivors.len();
    let rows: Vec<&'r R> = survivors
        .into_iter()
        .skip(page.offset())
        .take(page.size)
        .collect();

    log::debug!(
        "computed page {} of {} ({} rows, {} of {} records matched)",
        page.page,
        total_pages(total_matches, page.size),
        rows.len(),
        total_matches,
        records.len()
    );

    PageResult {
        rows,
        total_matches,
        total_pages: total_pages(total_matches, page.size),
        page: page.page,
        size: page.size,
    }
}

/// Returns `true` if any searchable field of `record` contains `needle`.
///
/// `needle` must already be lowercased. The fields searched are the record's
/// own fields plus any column that derives a field the record lacks; columns
/// with searching turned off are skipped.
fn matches_query<R: Record>(record: &R, needle: &str, columns: &[ColumnSpec<R>]) -> bool {
    let mut fields = record.field_names();
    for column in columns {
        if !fields.contains(&column.field()) {
            fields.push(column.field());
        }
    }

    fields
        .into_iter()
        .filter(|field| find_column(columns, field).map_or(true, ColumnSpec::is_searchable))
        .any(|field| contains_text(&resolve(record, field, columns), needle))
}

fn contains_text(value: &Value<'_>, needle: &str) -> bool {
    match value {
        Value::None => false,
        Value::String(s) => s.to_lowercase().contains(needle),
        other => other.to_string().to_lowercase().contains(needle),
    }
}

fn matches_filters<R: Record>(record: &R, filters: &FilterState, columns: &[ColumnSpec<R>]) -> bool {
    filters.iter().all(|(field, expected)| {
        match resolve(record, field, columns) {
            Value::None => false,
            Value::String(s) => s == expected,
            other => other.to_string() == expected,
        }
    })
}

fn sort_records<'r, R: Record>(records: &mut Vec<&'r R>, sort: &SortState, columns: &[ColumnSpec<R>]) {
    let Some(first) = records.first() else {
        return;
    };

    let known = find_column(columns, &sort.field).is_some()
        || first.field_names().contains(&sort.field.as_str());
    debug_assert!(
        known,
        "sort field '{}' is not a column or record field",
        sort.field
    );
    if !known {
        log::warn!(
            "sort field '{}' is not a column or record field; keeping input order",
            sort.field
        );
        return;
    }

    // Resolve every key once; stable sort keeps ties in input order.
    let mut keyed: Vec<(Value<'r>, &'r R)> = records
        .iter()
        .map(|record| (resolve(*record, &sort.field, columns), *record))
        .collect();
    keyed.sort_by(|a, b| sort.dir.apply(compare_values(&a.0, &b.0)));

    records.clear();
    records.extend(keyed.into_iter().map(|(_, record)| record));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Row;
    use crate::value::FieldValue;

    fn names<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter()
            .map(|row| match row.get("name") {
                Some(FieldValue::String(s)) => s.as_str(),
                _ => "",
            })
            .collect()
    }

    fn members() -> Vec<Row> {
        vec![
            Row::new()
                .with("name", "Ravi")
                .with("rating", 1450i64)
                .with("active", true),
            Row::new()
                .with("name", "Anjali")
                .with("rating", 1820i64)
                .with("active", false),
            Row::new()
                .with("name", "Kiran")
                .with("rating", 1450i64)
                .with("active", true),
            Row::new()
                .with("name", "Meena")
                .with("rating", None::<i64>)
                .with("active", true),
        ]
    }

    fn page(rows: &[Row], query: &str, filters: &FilterState, sort: Option<&SortState>) -> Vec<String> {
        let columns: Vec<ColumnSpec<Row>> = vec![];
        let result = compute_page(rows, query, filters, sort, PageRequest::new(1, 50), &columns);
        names(&result.rows).into_iter().map(String::from).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let rows = members();
        assert_eq!(page(&rows, "", &FilterState::new(), None).len(), 4);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_numbers() {
        let rows = members();
        assert_eq!(page(&rows, "KIR", &FilterState::new(), None), vec!["Kiran"]);
        assert_eq!(page(&rows, "182", &FilterState::new(), None), vec!["Anjali"]);
        assert_eq!(page(&rows, "false", &FilterState::new(), None), vec!["Anjali"]);
    }

    #[test]
    fn filter_uses_exact_text() {
        let rows = members();
        let filters = FilterState::new().with("rating", "1450");
        assert_eq!(page(&rows, "", &filters, None), vec!["Ravi", "Kiran"]);

        let partial = FilterState::new().with("name", "Rav");
        assert!(page(&rows, "", &partial, None).is_empty());
    }

    #[test]
    fn missing_field_never_matches_filter() {
        let rows = members();
        let filters = FilterState::new().with("rating", "");
        assert!(page(&rows, "", &filters, None).is_empty());
    }

    #[test]
    fn type_mismatched_filter_yields_nothing() {
        let rows = members();
        let filters = FilterState::new().with("active", "yes");
        assert!(page(&rows, "", &filters, None).is_empty());
    }

    #[test]
    fn numeric_sort_with_ties_and_missing_last() {
        let rows = members();
        assert_eq!(
            page(&rows, "", &FilterState::new(), Some(&SortState::asc("rating"))),
            vec!["Ravi", "Kiran", "Anjali", "Meena"]
        );
        assert_eq!(
            page(&rows, "", &FilterState::new(), Some(&SortState::desc("rating"))),
            vec!["Meena", "Anjali", "Ravi", "Kiran"]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "sort field 'nope' is not a column or record field")]
    fn unknown_sort_field_panics_in_debug() {
        let rows = members();
        page(&rows, "", &FilterState::new(), Some(&SortState::desc("nope")));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unknown_sort_field_keeps_input_order() {
        let rows = members();
        assert_eq!(
            page(&rows, "", &FilterState::new(), Some(&SortState::desc("nope"))),
            vec!["Ravi", "Anjali", "Kiran", "Meena"]
        );
    }

    #[test]
    fn extractor_drives_search_sort_and_filter() {
        let rows = members();
        let columns = vec![
            ColumnSpec::new("band")
                .sortable()
                .options(["high", "low"])
                .extract(|row: &Row| match row.field("rating").as_number() {
                    Some(n) if n.to_f64() >= 1500.0 => Value::from("high"),
                    Some(_) => Value::from("low"),
                    None => Value::None,
                }),
            ColumnSpec::new("name").searchable(false),
        ];

        let high = compute_page(
            &rows,
            "",
            &FilterState::new().with("band", "high"),
            None,
            PageRequest::default(),
            &columns,
        );
        assert_eq!(names(&high.rows), vec!["Anjali"]);

        let searched = compute_page(
            &rows,
            "low",
            &FilterState::new(),
            Some(&SortState::asc("band")),
            PageRequest::default(),
            &columns,
        );
        assert_eq!(names(&searched.rows), vec!["Ravi", "Kiran"]);

        // "name" is excluded from search.
        let by_name = compute_page(
            &rows,
            "meena",
            &FilterState::new(),
            None,
            PageRequest::default(),
            &columns,
        );
        assert_eq!(by_name.total_matches, 0);
    }

    #[test]
    fn slices_requested_page() {
        let rows = members();
        let columns: Vec<ColumnSpec<Row>> = vec![];
        let second = compute_page(
            &rows,
            "",
            &FilterState::new(),
            None,
            PageRequest::new(2, 3),
            &columns,
        );
        assert_eq!(names(&second.rows), vec!["Meena"]);
        assert_eq!(second.total_matches, 4);
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.page, 2);
        assert_eq!(second.size, 3);
    }
}
