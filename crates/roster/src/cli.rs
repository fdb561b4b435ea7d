//! The `roster` command: list a JSON array of records through a view.
//!
//! ```bash
//! # Every field as a column, first page
//! roster players.json
//!
//! # Search, filter and sort through a view definition
//! roster players.json --view players.yaml -q kumar -f district=Warangal -s rating:desc
//!
//! # Third page of ten as JSON, records from stdin
//! cat players.json | roster - -p 3 -n 10 -o json
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use roster_engine::{compute_page, EngineError, FilterState, PageRequest, Row, SortState};
use thiserror::Error;

use crate::render::{render_json, render_text};
use crate::view::{View, ViewConfig, ViewError};

/// Search, filter, sort and paginate a JSON array of records
#[derive(Parser, Debug, Clone)]
#[command(name = "roster", version, about)]
pub struct Args {
    /// JSON file holding an array of objects, or `-` for stdin
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// YAML view definition; defaults to every field of the first record
    #[arg(long, value_name = "FILE")]
    pub view: Option<PathBuf>,

    /// Case-insensitive search text
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Exact-match filter, repeatable
    #[arg(short, long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort as `field` or `field:asc|desc`
    #[arg(short, long, value_name = "FIELD[:DIR]")]
    pub sort: Option<SortState>,

    /// One-based page number
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page; defaults to the view's page size
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// More logging on stderr, repeatable
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// How a page is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table with summary and page strip
    Text,
    /// Rows and totals as JSON
    Json,
}

/// Table controls the view rejects. `main` exits with status 2 for these.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error(transparent)]
    Page(#[from] EngineError),
    #[error(transparent)]
    View(#[from] ViewError),
}

fn parse_filter(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", arg)),
    }
}

/// Log level for a `-v` count: warnings by default.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Reads a JSON array of records from `path`, or stdin for `-`.
pub fn load_records(path: &Path) -> Result<Vec<Row>> {
    let source = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read records from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read records from {}", path.display()))?
    };
    let records: Vec<Row> =
        serde_json::from_str(&source).context("records must be a JSON array of objects")?;
    log::info!("loaded {} records", records.len());
    Ok(records)
}

/// Runs the command and returns what it prints.
pub fn run(args: &Args) -> Result<String> {
    let records = load_records(&args.records)?;
    listing(args, &records, console::colors_enabled())
}

/// Computes and renders the requested page of `records`.
pub fn listing(args: &Args, records: &[Row], styled: bool) -> Result<String> {
    let config = match &args.view {
        Some(path) => ViewConfig::from_path(path)?,
        None => ViewConfig::infer(records),
    };
    let view = View::compile(config)?;

    let size = args.size.unwrap_or(view.config().page_size);
    let request = PageRequest::try_new(args.page, size).map_err(UsageError::from)?;

    let filters: FilterState = args.filters.iter().cloned().collect();
    view.check_filters(&filters).map_err(UsageError::from)?;

    let sort = match &args.sort {
        Some(sort) => Some(view.check_sort(sort.clone()).map_err(UsageError::from)?),
        None => view.default_sort().cloned(),
    };

    let result = compute_page(
        records,
        &args.query,
        &filters,
        sort.as_ref(),
        request,
        view.columns(),
    );
    if result.is_out_of_range() {
        log::info!(
            "page {} is past the last page ({})",
            result.page,
            result.total_pages
        );
    }

    let output = match args.output {
        OutputFormat::Text => render_text(&view, &result, styled)?,
        OutputFormat::Json => render_json(&result)?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("roster").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn parses_controls() {
        let args = parse(&[
            "players.json",
            "-q",
            "kumar",
            "-f",
            "district=Warangal",
            "--filter",
            "gender=F",
            "-s",
            "rating:desc",
            "-p",
            "3",
            "-n",
            "5",
            "-o",
            "json",
            "-vv",
        ]);
        assert_eq!(args.query, "kumar");
        assert_eq!(
            args.filters,
            vec![
                ("district".to_string(), "Warangal".to_string()),
                ("gender".to_string(), "F".to_string()),
            ]
        );
        assert_eq!(args.sort, Some(SortState::desc("rating")));
        assert_eq!(args.page, 3);
        assert_eq!(args.size, Some(5));
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(log_level(args.verbose), LevelFilter::Debug);
    }

    #[test]
    fn defaults() {
        let args = parse(&["-"]);
        assert_eq!(args.records, PathBuf::from("-"));
        assert_eq!(args.query, "");
        assert!(args.filters.is_empty());
        assert_eq!(args.page, 1);
        assert_eq!(args.size, None);
        assert_eq!(args.output, OutputFormat::Text);
        assert_eq!(log_level(args.verbose), LevelFilter::Warn);
    }

    #[test]
    fn rejects_malformed_arguments() {
        let argv = |extra: &[&'static str]| {
            let mut argv = vec!["roster", "players.json"];
            argv.extend_from_slice(extra);
            Args::try_parse_from(argv)
        };
        assert!(argv(&["-f", "district"]).is_err());
        assert!(argv(&["-f", "=Warangal"]).is_err());
        assert!(argv(&["-s", "rating:sideways"]).is_err());
        assert!(argv(&["-o", "csv"]).is_err());
    }

    #[test]
    fn filter_values_keep_equals_signs() {
        assert_eq!(
            parse_filter("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
    }

    #[test]
    fn log_levels() {
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(3), LevelFilter::Trace);
        assert_eq!(log_level(9), LevelFilter::Trace);
    }

    fn records() -> Vec<Row> {
        ["Asha", "Bala", "Chitra", "Deepa", "Esha"]
            .iter()
            .zip([1400i64, 1650, 1520, 1700, 1380])
            .map(|(name, rating)| Row::new().with("name", *name).with("rating", rating))
            .collect()
    }

    #[test]
    fn inferred_view_sorts_and_pages() {
        let args = parse(&["-", "-s", "rating:desc", "-n", "2", "-o", "json"]);
        let out = listing(&args, &records(), false).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["total_matches"], 5);
        assert_eq!(json["total_pages"], 3);
        assert_eq!(json["rows"][0]["name"], "Deepa");
        assert_eq!(json["rows"][1]["name"], "Bala");
    }

    #[test]
    fn bad_page_is_a_usage_error() {
        let args = parse(&["-", "-p", "0"]);
        let err = listing(&args, &records(), false).unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());

        let args = parse(&["-", "-n", "0"]);
        let err = listing(&args, &records(), false).unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());
    }

    #[test]
    fn unknown_sort_column_is_a_usage_error() {
        let args = parse(&["-", "-s", "height"]);
        let err = listing(&args, &records(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UsageError>(),
            Some(UsageError::View(ViewError::NotSortable(field))) if field == "height"
        ));
    }

    #[test]
    fn text_output_has_summary() {
        let args = parse(&["-", "-q", "sha"]);
        let out = listing(&args, &records(), false).unwrap();
        assert!(out.contains("Asha"));
        assert!(out.contains("Esha"));
        assert!(!out.contains("Bala"));
        assert!(out.contains("Showing 1–2 of 2"));
    }
}
