//! View definitions: the per-screen column registry, loaded from YAML.
//!
//! A view names the columns of a listing, which of them can be sorted,
//! filtered and searched, the allowed values of filterable columns, and an
//! optional minijinja `format` expression per column:
//!
//! ```yaml
//! title: Registered players
//! page_size: 10
//! default_sort: name
//! columns:
//!   - field: name
//!     label: Player
//!     sortable: true
//!   - field: district
//!     options: [Hyderabad, Warangal]
//!     searchable: false
//!   - field: rating
//!     sortable: true
//!     format: "{{ value if value is not none else 'unrated' }}"
//! ```
//!
//! A column with a `format` matches, sorts and displays by the rendered
//! text, so a formatted numeric column sorts lexicographically.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::Environment;
use roster_engine::{
    find_column, ColumnSpec, EngineError, FilterState, Record, Row, SortState, Value,
    DEFAULT_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a view or checking table controls against it.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The view file could not be read.
    #[error("failed to read view {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The view file is not valid YAML for a view.
    #[error("invalid view definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The view's page size is zero.
    #[error("view page_size must be at least 1")]
    InvalidPageSize,

    /// Two columns describe the same field.
    #[error("column '{0}' is declared more than once")]
    DuplicateColumn(String),

    /// A column's `format` expression does not compile.
    #[error("invalid format for column '{field}': {source}")]
    Format {
        field: String,
        #[source]
        source: minijinja::Error,
    },

    /// A sort expression is malformed.
    #[error(transparent)]
    Sort(#[from] EngineError),

    /// The field is not a sortable column of this view.
    #[error("cannot sort by '{0}': not a sortable column")]
    NotSortable(String),

    /// The field is not a filterable column of this view.
    #[error("cannot filter by '{0}': not a filterable column")]
    NotFilterable(String),

    /// The value is not among the column's options.
    #[error("invalid value '{value}' for '{field}': expected one of {}", .options.join(", "))]
    InvalidOption {
        field: String,
        value: String,
        options: Vec<String>,
    },
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_window() -> usize {
    1
}

fn default_true() -> bool {
    true
}

/// One column of a view definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Record field shown in this column.
    pub field: String,
    /// Header label; defaults to the field name.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    /// Implied by a non-empty `options` list.
    #[serde(default)]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub searchable: bool,
    /// Allowed filter values.
    #[serde(default)]
    pub options: Vec<String>,
    /// minijinja expression producing the column text from `value` and `row`.
    #[serde(default)]
    pub format: Option<String>,
}

impl ColumnConfig {
    /// A plain column for `field`: searchable only.
    pub fn new(field: impl Into<String>) -> Self {
        ColumnConfig {
            field: field.into(),
            label: None,
            sortable: false,
            filterable: false,
            searchable: true,
            options: Vec::new(),
            format: None,
        }
    }
}

/// A view definition as written in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Pages shown either side of the current one in the page strip.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Initial sort, as `field` or `field:asc|desc`.
    #[serde(default)]
    pub default_sort: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            title: None,
            page_size: default_page_size(),
            window: default_window(),
            default_sort: None,
            columns: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Parses a view definition.
    pub fn from_yaml(source: &str) -> Result<Self, ViewError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and parses a view definition file.
    pub fn from_path(path: &Path) -> Result<Self, ViewError> {
        let source = fs::read_to_string(path).map_err(|source| ViewError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded view definition from {}", path.display());
        Self::from_yaml(&source)
    }

    /// A view over every field of the first record, each column sortable,
    /// filterable and searchable.
    pub fn infer(records: &[Row]) -> Self {
        let columns = records
            .first()
            .map(|row| {
                row.field_names()
                    .into_iter()
                    .map(|field| ColumnConfig {
                        sortable: true,
                        filterable: true,
                        ..ColumnConfig::new(field)
                    })
                    .collect()
            })
            .unwrap_or_default();
        ViewConfig {
            columns,
            ..ViewConfig::default()
        }
    }
}

/// A checked view, ready to drive the engine.
#[derive(Debug, Clone)]
pub struct View {
    config: ViewConfig,
    columns: Vec<ColumnSpec<Row>>,
    default_sort: Option<SortState>,
}

impl View {
    /// Checks a view definition and compiles its column formats.
    pub fn compile(config: ViewConfig) -> Result<Self, ViewError> {
        if config.page_size == 0 {
            return Err(ViewError::InvalidPageSize);
        }

        let mut seen = HashSet::new();
        let mut env = Environment::new();
        for column in &config.columns {
            if !seen.insert(column.field.as_str()) {
                return Err(ViewError::DuplicateColumn(column.field.clone()));
            }
            if let Some(format) = &column.format {
                env.add_template_owned(template_name(&column.field), format.clone())
                    .map_err(|source| ViewError::Format {
                        field: column.field.clone(),
                        source,
                    })?;
            }
        }

        let env = Arc::new(env);
        let columns = config
            .columns
            .iter()
            .map(|column| column_spec(column, &env))
            .collect();

        let view = View {
            default_sort: None,
            columns,
            config,
        };
        let default_sort = match &view.config.default_sort {
            Some(sort) => Some(view.check_sort(sort.parse()?)?),
            None => None,
        };
        Ok(View {
            default_sort,
            ..view
        })
    }

    /// The definition this view was compiled from.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Column specs for the engine.
    pub fn columns(&self) -> &[ColumnSpec<Row>] {
        &self.columns
    }

    /// The view's initial sort.
    pub fn default_sort(&self) -> Option<&SortState> {
        self.default_sort.as_ref()
    }

    /// Accepts `sort` if its field is a sortable column.
    pub fn check_sort(&self, sort: SortState) -> Result<SortState, ViewError> {
        match find_column(&self.columns, &sort.field) {
            Some(column) if column.is_sortable() => Ok(sort),
            _ => Err(ViewError::NotSortable(sort.field)),
        }
    }

    /// Accepts `filters` if every field is a filterable column and every
    /// value is among that column's options, when it declares any.
    pub fn check_filters(&self, filters: &FilterState) -> Result<(), ViewError> {
        for (field, value) in filters.iter() {
            let column = find_column(&self.columns, field)
                .filter(|column| column.is_filterable())
                .ok_or_else(|| ViewError::NotFilterable(field.to_string()))?;

            let options = column.get_options();
            if !options.is_empty() && !options.iter().any(|option| option == value) {
                return Err(ViewError::InvalidOption {
                    field: field.to_string(),
                    value: value.to_string(),
                    options: options.to_vec(),
                });
            }
        }
        Ok(())
    }
}

fn template_name(field: &str) -> String {
    format!("column:{}", field)
}

fn column_spec(config: &ColumnConfig, env: &Arc<Environment<'static>>) -> ColumnSpec<Row> {
    let mut spec = ColumnSpec::new(config.field.clone()).searchable(config.searchable);
    if let Some(label) = &config.label {
        spec = spec.label(label.clone());
    }
    if config.sortable {
        spec = spec.sortable();
    }
    if config.filterable {
        spec = spec.filterable();
    }
    if !config.options.is_empty() {
        spec = spec.options(config.options.iter().cloned());
    }
    if config.format.is_some() {
        let env = Arc::clone(env);
        let field = config.field.clone();
        spec = spec.extract(move |row: &Row| render_format(&env, &field, row));
    }
    spec
}

fn render_format<'a>(env: &Environment<'static>, field: &str, row: &'a Row) -> Value<'a> {
    let rendered = env.get_template(&template_name(field)).and_then(|template| {
        template.render(minijinja::context! {
            value => row
                .get(field)
                .map(minijinja::Value::from_serialize)
                .unwrap_or_else(|| minijinja::Value::from(())),
            row => minijinja::Value::from_serialize(row),
        })
    });
    match rendered {
        Ok(text) => Value::from(text),
        Err(err) => {
            log::warn!("format for column '{}' failed: {}", field, err);
            row.field(field)
        }
    }
}
