//! Text and JSON output for a computed page.

use console::style;
use minijinja::{context, Environment};
use roster_engine::{PageResult, Row};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::view::View;

const COLUMN_GAP: &str = "  ";

const PAGE_TEMPLATE: &str = "\
{% if title %}{{ title }}\n\n{% endif %}\
{{ header }}\n\
{{ rule }}\n\
{% for line in lines %}{{ line }}\n{% else %}(no matching records)\n{% endfor %}\
\n\
{{ summary }}\n\
{{ strip }}";

/// Renders a page as an aligned text table followed by the results summary
/// and the page strip.
///
/// With `styled`, the header row is bold. Column widths are measured in
/// terminal cells, so wide characters stay aligned.
pub fn render_text(
    view: &View,
    result: &PageResult<&Row>,
    styled: bool,
) -> Result<String, minijinja::Error> {
    let headers: Vec<String> = view
        .columns()
        .iter()
        .map(|column| column.display_label().to_string())
        .collect();
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| {
            view.columns()
                .iter()
                .map(|column| column.value(*row).to_string())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let header = join_padded(&headers, &widths);
    let header = if styled {
        style(header).bold().to_string()
    } else {
        header
    };
    let rule = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    let lines: Vec<String> = cells.iter().map(|row| join_padded(row, &widths)).collect();

    let mut env = Environment::new();
    env.add_template("page", PAGE_TEMPLATE)?;
    env.get_template("page")?.render(context! {
        title => view.config().title.as_deref(),
        header => header,
        rule => rule,
        lines => lines,
        summary => result.summary(),
        strip => result.strip(view.config().window).to_string(),
    })
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_right(cell, *width))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

#[derive(Serialize)]
struct JsonPage<'a> {
    rows: &'a [&'a Row],
    total_matches: usize,
    total_pages: usize,
    page: usize,
    size: usize,
    summary: String,
}

/// Renders a page as pretty-printed JSON with its totals and summary.
pub fn render_json(result: &PageResult<&Row>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonPage {
        rows: &result.rows,
        total_matches: result.total_matches,
        total_pages: result.total_pages,
        page: result.page,
        size: result.size,
        summary: result.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ColumnConfig, ViewConfig};
    use roster_engine::{compute_page, FilterState, PageRequest};

    fn view() -> View {
        View::compile(ViewConfig {
            title: Some("Districts".into()),
            page_size: 2,
            columns: vec![
                ColumnConfig {
                    label: Some("District".into()),
                    ..ColumnConfig::new("name")
                },
                ColumnConfig::new("clubs"),
            ],
            ..ViewConfig::default()
        })
        .unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("name", "Hyderabad").with("clubs", 42i64),
            Row::new().with("name", "Warangal").with("clubs", 9i64),
            Row::new().with("name", "Karimnagar").with("clubs", 7i64),
        ]
    }

    #[test]
    fn text_table_is_aligned() {
        let view = view();
        let rows = rows();
        let result = compute_page(
            &rows,
            "",
            &FilterState::new(),
            None,
            PageRequest::new(1, 2),
            view.columns(),
        );

        let text = render_text(&view, &result, false).unwrap();
        let expected = "\
Districts

District   clubs
─────────  ─────
Hyderabad  42
Warangal   9

Showing 1–2 of 3
‹ prev | [1] 2 | next ›";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_page_says_so() {
        let view = view();
        let rows = rows();
        let result = compute_page(
            &rows,
            "nowhere",
            &FilterState::new(),
            None,
            PageRequest::new(1, 2),
            view.columns(),
        );

        let text = render_text(&view, &result, false).unwrap();
        assert!(text.contains("(no matching records)"));
        assert!(text.contains("Showing 0 of 0"));
    }

    #[test]
    fn wide_characters_are_measured_in_cells() {
        assert_eq!(pad_right("日本", 6), "日本  ");
        assert_eq!(pad_right("abc", 2), "abc");
    }

    #[test]
    fn json_page() {
        let rows = rows();
        let columns = view().columns().to_vec();
        let result = compute_page(
            &rows,
            "",
            &FilterState::new(),
            None,
            PageRequest::new(2, 2),
            &columns,
        );

        let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(json["total_matches"], 3);
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["page"], 2);
        assert_eq!(json["summary"], "Showing 3–3 of 3");
        assert_eq!(json["rows"][0]["name"], "Karimnagar");
    }
}
