//! List/filter query building.
//!
//! The listing endpoints take `page`/`pageSize` pagination, optional
//! `filtro_<column>` case-insensitive substring filters, and a single
//! `ordenColumna`/`ordenAsc` sort. Columns are checked against the module's
//! allow-list before any SQL text is produced; filter values have their
//! LIKE wildcards escaped and are returned as bind parameters, never
//! spliced into the statement. LIMIT and OFFSET are interpolated directly
//! because they are validated integers.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{PlantaError, Result};
use crate::registry::TableSpec;

/// A validated listing request against one module's table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    /// `(column, needle)` pairs; columns are already allow-listed.
    pub filters: Vec<(String, String)>,
    pub order_by: String,
    pub ascending: bool,
}

/// One page of rows plus the filtered total.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage {
    pub datos: Vec<Value>,
    pub total: i64,
}

impl ListQuery {
    /// Validate raw query parameters against a module's allow-list.
    ///
    /// Rejects out-of-range pagination and any filter or sort column the
    /// module does not declare, before a statement is built.
    pub fn from_params(
        spec: &TableSpec,
        params: &HashMap<String, String>,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Result<Self> {
        let page = match params.get("page") {
            Some(raw) => raw.parse::<u32>().ok().filter(|p| *p >= 1).ok_or_else(|| {
                PlantaError::ValidationError(format!("Invalid page parameter: {raw}"))
            })?,
            None => 1,
        };

        let page_size = match params.get("pageSize") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|s| *s >= 1 && *s <= max_page_size)
                .ok_or_else(|| {
                    PlantaError::ValidationError(format!(
                        "pageSize must be between 1 and {max_page_size}"
                    ))
                })?,
            None => default_page_size,
        };

        let mut filters = Vec::new();
        for (key, value) in params {
            let Some(column) = key.strip_prefix("filtro_") else {
                continue;
            };
            if !spec.allows_column(column) {
                return Err(PlantaError::ValidationError(format!(
                    "Unknown filter column: {column}"
                )));
            }
            if value.is_empty() {
                continue;
            }
            filters.push((column.to_string(), value.clone()));
        }
        // HashMap iteration order is arbitrary; keep the statement text stable.
        filters.sort();

        let order_by = match params.get("ordenColumna") {
            Some(column) if !column.is_empty() => {
                if !spec.allows_column(column) {
                    return Err(PlantaError::ValidationError(format!(
                        "Unknown sort column: {column}"
                    )));
                }
                column.clone()
            }
            _ => spec.default_order.to_string(),
        };

        let ascending = params
            .get("ordenAsc")
            .map(|raw| !matches!(raw.as_str(), "false" | "0" | "desc"))
            .unwrap_or(true);

        Ok(Self {
            page,
            page_size,
            filters,
            order_by,
            ascending,
        })
    }

    /// Row offset for the current page, widened so large page numbers
    /// cannot overflow the multiplication.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.page_size)
    }

    /// SELECT statement returning each row as a jsonb object, plus binds.
    pub fn select_sql(&self, spec: &TableSpec) -> (String, Vec<String>) {
        let (where_sql, binds) = self.where_clause();
        let direction = if self.ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT to_jsonb(t) FROM \"{}\" t{} ORDER BY t.\"{}\" {} LIMIT {} OFFSET {}",
            spec.table,
            where_sql,
            self.order_by,
            direction,
            self.page_size,
            self.offset()
        );
        (sql, binds)
    }

    /// COUNT statement over the same filters.
    pub fn count_sql(&self, spec: &TableSpec) -> (String, Vec<String>) {
        let (where_sql, binds) = self.where_clause();
        let sql = format!("SELECT COUNT(*) FROM \"{}\" t{}", spec.table, where_sql);
        (sql, binds)
    }

    fn where_clause(&self) -> (String, Vec<String>) {
        if self.filters.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut clauses = Vec::with_capacity(self.filters.len());
        let mut binds = Vec::with_capacity(self.filters.len());
        for (position, (column, needle)) in self.filters.iter().enumerate() {
            clauses.push(format!(
                "t.\"{}\"::text ILIKE '%' || ${} || '%' ESCAPE '\\'",
                column,
                position + 1
            ));
            binds.push(escape_like(needle));
        }

        (format!(" WHERE {}", clauses.join(" AND ")), binds)
    }
}

/// Escape LIKE wildcards so a filter value matches as a literal substring.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
