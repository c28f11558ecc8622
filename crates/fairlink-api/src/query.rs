// Row query description
//
// Transport-neutral description of a `select`: the table, the column
// list (which may embed related rows), equality filters, and ordering.
// The REST gateway renders these as PostgREST-style query parameters.

use std::fmt;

use serde_json::{Map, Value};

/// A single row as returned by the store.
pub type Row = Map<String, Value>;

/// Equality filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Render as a `(name, value)` query pair, e.g. `("id", "eq.42")`.
    pub fn to_query_pair(&self) -> (String, String) {
        (self.column.clone(), format!("eq.{}", self.value))
    }
}

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering applied to a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub direction: Direction,
}

impl Order {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Ascending,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Descending,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        write!(f, "{}.{dir}", self.column)
    }
}

/// A complete row query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub table: &'static str,
    pub columns: &'static str,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Select {
    /// `select * from {table}`.
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            columns: "*",
            filters: Vec::new(),
            order: None,
        }
    }

    /// Replace the column list (supports embedded lookups such as
    /// `*,booths:booth_id(name)`).
    pub fn columns(mut self, columns: &'static str) -> Self {
        self.columns = columns;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter(Filter::eq(column, value))
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// All query parameters for this select, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), compact_columns(self.columns))];
        pairs.extend(self.filters.iter().map(Filter::to_query_pair));
        if let Some(ref order) = self.order {
            pairs.push(("order".to_owned(), order.to_string()));
        }
        pairs
    }
}

/// Strip insignificant whitespace from a column list so multi-line
/// embedded selections produce a clean query string.
fn compact_columns(columns: &str) -> String {
    columns.chars().filter(|c| !c.is_whitespace()).collect()
}
