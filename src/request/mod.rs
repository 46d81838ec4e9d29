//! Reporting request model.
//!
//! A [`ReportingRequest`] is the immutable description of one report query:
//! the cube it targets, the columns it selects, its filters, sort order and
//! paging. Curators never mutate a request in place; every rewrite goes
//! through the `with_*` builders, which consume `self` and return a new value.

mod filter;

pub use filter::Filter;

use serde::{Deserialize, Serialize};

/// A logical output column, identified by name.
///
/// The optional alias is the key the column is published under in result
/// rows. Two fields are equal when their names are equal.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Field {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Field {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The column key this field is published under in result rows.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
    }
}

impl std::hash::Hash for Field {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.field.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    #[serde(alias = "ASC", alias = "asc")]
    Asc,
    #[serde(alias = "DESC", alias = "desc")]
    Desc,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub field: String,
    pub order: Order,
}

impl SortBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Order::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Order::Desc,
        }
    }
}

/// Parameters that pick the plan-generation bucket for a request.
///
/// Opaque to curators; they are handed to the plan generator untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketParams {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub force_revision: Option<u32>,
}

/// An immutable report query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingRequest {
    pub cube: String,
    pub select_fields: Vec<Field>,
    #[serde(default)]
    pub sort_by: Vec<SortBy>,
    #[serde(default)]
    pub pagination_start_index: u64,
    pub rows_per_page: u64,
    #[serde(default)]
    pub filter_expressions: Vec<Filter>,
    #[serde(default)]
    pub include_row_count: bool,
    /// Size of the requested date range, in days.
    pub num_days: u32,
}

impl ReportingRequest {
    pub fn new(cube: impl Into<String>, num_days: u32) -> Self {
        Self {
            cube: cube.into(),
            select_fields: Vec::new(),
            sort_by: Vec::new(),
            pagination_start_index: 0,
            rows_per_page: 200,
            filter_expressions: Vec::new(),
            include_row_count: false,
            num_days,
        }
    }

    pub fn with_cube(mut self, cube: impl Into<String>) -> Self {
        self.cube = cube.into();
        self
    }

    /// Replace the selected fields, keeping the first occurrence of each name.
    pub fn with_select_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.select_fields = dedup_preserving_order(fields);
        self
    }

    pub fn with_sort_by(mut self, sort_by: Vec<SortBy>) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Reset paging to the first page of `rows_per_page` rows.
    pub fn with_paging(mut self, rows_per_page: u64) -> Self {
        self.pagination_start_index = 0;
        self.rows_per_page = rows_per_page;
        self
    }

    /// Replace the filters, dropping duplicates.
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filter_expressions = dedup_preserving_order(filters);
        self
    }

    /// Append a filter unless an equal one is already present.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        if !self.filter_expressions.contains(&filter) {
            self.filter_expressions.push(filter);
        }
        self
    }

    pub fn with_row_count(mut self, include_row_count: bool) -> Self {
        self.include_row_count = include_row_count;
        self
    }

    pub fn selects(&self, name: &str) -> bool {
        self.select_fields.iter().any(|f| f.field == name)
    }
}

fn dedup_preserving_order<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
