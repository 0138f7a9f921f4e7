//! SQL generation for list queries.
//!
//! [`EntityFilterSqlBuilder`] turns an [`EntityQuery`] into a WHERE clause
//! with positional parameters. Every user-supplied value is bound, never
//! interpolated.

use keepsake_core::{tsquery_any, EntityQuery};

/// Type-safe parameter binding for SQL queries.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// Boolean parameter.
    Bool(bool),
    /// String parameter.
    String(String),
    /// Array of strings (for tag intersection).
    StringArray(Vec<String>),
}

/// Generates WHERE clause fragments for an [`EntityQuery`].
///
/// # Example
///
/// ```rust,ignore
/// let query = EntityQuery::from_params(Some("rust"), Some("dev,web"), None);
/// let (sql, params) = EntityFilterSqlBuilder::new(&query, 0).build();
/// // sql: "search_vector @@ to_tsquery('english', $1) AND tags && $2::text[]"
/// ```
pub struct EntityFilterSqlBuilder<'a> {
    query: &'a EntityQuery,
    param_offset: usize,
}

impl<'a> EntityFilterSqlBuilder<'a> {
    /// Create a builder. `param_offset` is the number of parameters already
    /// bound ahead of the WHERE clause.
    pub fn new(query: &'a EntityQuery, param_offset: usize) -> Self {
        Self {
            query,
            param_offset,
        }
    }

    /// Build the WHERE clause and its parameters, in binding order.
    ///
    /// Returns `("TRUE", [])` for an unfiltered query. A text query that
    /// yields no search terms produces `FALSE`.
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        let mut param_idx = self.param_offset;

        if self.query.text.is_some() {
            match tsquery_any(&self.query.terms) {
                Some(tsquery) => {
                    param_idx += 1;
                    clauses.push(format!(
                        "search_vector @@ to_tsquery('english', ${})",
                        param_idx
                    ));
                    params.push(QueryParam::String(tsquery));
                }
                None => clauses.push("FALSE".to_string()),
            }
        }

        if let Some(tags) = &self.query.tags {
            param_idx += 1;
            clauses.push(format!("tags && ${}::text[]", param_idx));
            params.push(QueryParam::StringArray(tags.clone()));
        }

        if self.query.favorites_only {
            param_idx += 1;
            clauses.push(format!("is_favorite = ${}", param_idx));
            params.push(QueryParam::Bool(true));
        }

        if clauses.is_empty() {
            ("TRUE".to_string(), params)
        } else {
            (clauses.join(" AND "), params)
        }
    }
}

/// Bind builder parameters onto a query in order.
pub(crate) fn bind_params<'q>(
    mut q: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    params: &'q [QueryParam],
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    for param in params {
        q = match param {
            QueryParam::Bool(b) => q.bind(b),
            QueryParam::String(s) => q.bind(s),
            QueryParam::StringArray(arr) => q.bind(arr),
        };
    }
    q
}
