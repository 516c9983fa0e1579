//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for report-engine integration tests.
//!
//! `MemoryDb` is an in-memory `QueryExecutor`/`TableCatalog` that
//! interprets the narrow SQL grammar the query builder emits: the
//! distinct page-value query, the bounded preview, and the aggregate/flat
//! queries over the `(SELECT * FROM t ... LIMIT n) AS sublist` subquery.
//! Anything else fails the query, which doubles as a guard against the
//! builder drifting away from its documented statement shapes.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use datalayer::{
    ColumnKind, ColumnMeta, DataError, QueryExecutor, ResultSet, Row, SqlValue, Statement,
    TableCatalog,
};

// ============================================================================
// IN-MEMORY DATABASE
// ============================================================================

struct Table {
    columns: Vec<ColumnMeta>,
    rows: Vec<Row>,
}

impl Table {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

pub struct MemoryDb {
    tables: BTreeMap<String, Table>,
}

impl MemoryDb {
    pub fn new() -> Self {
        MemoryDb {
            tables: BTreeMap::new(),
        }
    }

    pub fn add_table(&mut self, name: &str, columns: &[(&str, ColumnKind)], rows: Vec<Row>) {
        let columns = columns
            .iter()
            .map(|(name, kind)| ColumnMeta::new(name, *kind))
            .collect();
        self.tables.insert(name.to_string(), Table { columns, rows });
    }

    fn execute(&self, statement: &Statement) -> Option<ResultSet> {
        let sql = statement.sql.as_str();

        // SELECT DISTINCT page_label FROM table
        if let Some(rest) = sql.strip_prefix("SELECT DISTINCT ") {
            let (column, table_name) = rest.split_once(" FROM ")?;
            let table = self.tables.get(table_name)?;
            let index = table.column_index(column)?;
            let mut seen = HashSet::new();
            let mut rows = Vec::new();
            for row in &table.rows {
                if seen.insert(row[index].clone()) {
                    rows.push(vec![row[index].clone()]);
                }
            }
            return Some(ResultSet::new(vec![table.columns[index].clone()], rows));
        }

        // SELECT * FROM table LIMIT n  (preview)
        if let Some(rest) = sql.strip_prefix("SELECT * FROM ") {
            let (table_name, limit) = rest.split_once(" LIMIT ")?;
            let table = self.tables.get(table_name)?;
            let limit: usize = limit.parse().ok()?;
            return Some(ResultSet::new(
                table.columns.clone(),
                table.rows.iter().take(limit).cloned().collect(),
            ));
        }

        // SELECT items FROM (SELECT * FROM t [WHERE ...] LIMIT n) AS sublist
        //     [GROUP BY ...] [ORDER BY ...]
        let rest = sql.strip_prefix("SELECT ")?;
        let (select_list, rest) = rest.split_once(" FROM (SELECT * FROM ")?;
        let (inner, tail) = rest.split_once(") AS sublist")?;

        let (inner_head, limit) = inner.rsplit_once(" LIMIT ")?;
        let limit: usize = limit.parse().ok()?;
        let (table_name, where_clause) = match inner_head.split_once(" WHERE ") {
            Some((table_name, conditions)) => (table_name, Some(conditions)),
            None => (inner_head, None),
        };
        let table = self.tables.get(table_name)?;

        let mut cursor = 0usize;
        let mut conditions: Vec<(usize, SqlValue)> = Vec::new();
        if let Some(where_clause) = where_clause {
            for condition in where_clause.split(" AND ") {
                let (column, placeholder) = condition.split_once(" = ")?;
                let index = table.column_index(column)?;
                let value = resolve_param(placeholder, &statement.params, &mut cursor)?;
                conditions.push((index, value));
            }
        }

        let mut source_rows: Vec<&Row> = Vec::new();
        for row in &table.rows {
            if conditions.iter().all(|(index, value)| &row[*index] == value) {
                source_rows.push(row);
                if source_rows.len() == limit {
                    break;
                }
            }
        }

        let (group_by, order_by) = parse_tail(tail)?;
        let items: Vec<&str> = select_list.split(", ").collect();

        let mut result = match group_by {
            Some(group_cols) => execute_grouped(table, &items, group_cols, &source_rows)?,
            None => {
                let indices: Vec<usize> = items
                    .iter()
                    .map(|c| table.column_index(c))
                    .collect::<Option<_>>()?;
                let rows = source_rows
                    .iter()
                    .map(|row| indices.iter().map(|i| row[*i].clone()).collect())
                    .collect();
                let columns = indices.iter().map(|i| table.columns[*i].clone()).collect();
                ResultSet::new(columns, rows)
            }
        };

        if let Some(order_by) = order_by {
            sort_rows(&mut result, order_by)?;
        }
        Some(result)
    }

}

fn execute_grouped(
    table: &Table,
    items: &[&str],
    group_cols: &str,
    source_rows: &[&Row],
) -> Option<ResultSet> {
    let group_indices: Vec<usize> = group_cols
        .split(", ")
        .map(|c| table.column_index(c))
        .collect::<Option<_>>()?;
    let aggregate_item = items.last()?;
    let (aggregate, value_col) = aggregate_item.split_once('(')?;
    let value_index = table.column_index(value_col.strip_suffix(')')?)?;

    // Group in first-seen order.
    let mut order: Vec<Row> = Vec::new();
    let mut groups: HashMap<Row, Vec<&Row>> = HashMap::new();
    for &row in source_rows {
        let key: Row = group_indices.iter().map(|i| row[*i].clone()).collect();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    let mut rows = Vec::with_capacity(order.len());
    for key in order {
        let members = &groups[&key];
        let summary = match aggregate {
            "COUNT" => SqlValue::Integer(members.len() as i64),
            _ => {
                let values: Vec<f64> = members
                    .iter()
                    .map(|row| row[value_index].as_f64())
                    .collect::<Option<_>>()?;
                let value = match aggregate {
                    "SUM" => values.iter().sum(),
                    "AVG" => values.iter().sum::<f64>() / values.len() as f64,
                    "MIN" => values.iter().copied().fold(f64::INFINITY, f64::min),
                    "MAX" => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    _ => return None,
                };
                SqlValue::Float(value)
            }
        };
        let mut out = key;
        out.push(summary);
        rows.push(out);
    }

    let mut columns: Vec<ColumnMeta> = group_indices
        .iter()
        .map(|i| table.columns[*i].clone())
        .collect();
    columns.push(ColumnMeta::new(aggregate_item, ColumnKind::Numeric));
    Some(ResultSet::new(columns, rows))
}

impl QueryExecutor for MemoryDb {
    fn run(&self, statement: &Statement) -> Result<ResultSet, DataError> {
        self.execute(statement)
            .ok_or_else(|| DataError::QueryFailed(format!("unsupported query: {}", statement.sql)))
    }
}

impl TableCatalog for MemoryDb {
    fn test_connection(&self) -> bool {
        true
    }

    fn table_names(&self) -> Result<Vec<String>, DataError> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnMeta>, DataError> {
        self.tables
            .get(table)
            .map(|t| t.columns.clone())
            .ok_or_else(|| DataError::QueryFailed(format!("no such table: {}", table)))
    }
}

fn parse_tail(tail: &str) -> Option<(Option<&str>, Option<&str>)> {
    if tail.is_empty() {
        return Some((None, None));
    }
    if let Some(rest) = tail.strip_prefix(" GROUP BY ") {
        return Some(match rest.split_once(" ORDER BY ") {
            Some((group_by, order_by)) => (Some(group_by), Some(order_by)),
            None => (Some(rest), None),
        });
    }
    if let Some(order_by) = tail.strip_prefix(" ORDER BY ") {
        return Some((None, Some(order_by)));
    }
    None
}

/// Accepts both dialects: `?` consumes parameters positionally, `$n` is a
/// 1-based index.
fn resolve_param(
    placeholder: &str,
    params: &[SqlValue],
    cursor: &mut usize,
) -> Option<SqlValue> {
    if placeholder == "?" {
        let value = params.get(*cursor)?.clone();
        *cursor += 1;
        return Some(value);
    }
    let index: usize = placeholder.strip_prefix('$')?.parse().ok()?;
    params.get(index.checked_sub(1)?).cloned()
}

fn sort_rows(result: &mut ResultSet, order_by: &str) -> Option<()> {
    let (column, direction) = order_by.split_once(' ')?;
    let index = result.column_index(column)?;
    result.rows.sort_by(|a, b| compare(&a[index], &b[index]));
    match direction {
        "ASC" => {}
        "DESC" => result.rows.reverse(),
        _ => return None,
    }
    Some(())
}

fn compare(a: &SqlValue, b: &SqlValue) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => match (a, b) {
            (SqlValue::Text(x), SqlValue::Text(y)) => x.cmp(y),
            (SqlValue::Boolean(x), SqlValue::Boolean(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

/// Always fails, for exercising the fail-fast paths.
pub struct FailingDb;

impl QueryExecutor for FailingDb {
    fn run(&self, _statement: &Statement) -> Result<ResultSet, DataError> {
        Err(DataError::QueryFailed("simulated failure".to_string()))
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

/// `sales(region, quarter, revenue)` with the three Q1 rows.
pub fn sales_db() -> MemoryDb {
    let mut db = MemoryDb::new();
    db.add_table(
        "sales",
        &[
            ("region", ColumnKind::Text),
            ("quarter", ColumnKind::Text),
            ("revenue", ColumnKind::Numeric),
        ],
        vec![
            vec![text("E"), text("Q1"), SqlValue::Integer(10)],
            vec![text("E"), text("Q1"), SqlValue::Integer(20)],
            vec![text("W"), text("Q1"), SqlValue::Integer(5)],
        ],
    );
    db
}

/// The sales fixture plus a second quarter row `("E", "Q2", 7)`.
pub fn sales_db_with_q2() -> MemoryDb {
    let mut db = sales_db();
    db.add_table(
        "sales",
        &[
            ("region", ColumnKind::Text),
            ("quarter", ColumnKind::Text),
            ("revenue", ColumnKind::Numeric),
        ],
        vec![
            vec![text("E"), text("Q1"), SqlValue::Integer(10)],
            vec![text("E"), text("Q1"), SqlValue::Integer(20)],
            vec![text("W"), text("Q1"), SqlValue::Integer(5)],
            vec![text("E"), text("Q2"), SqlValue::Integer(7)],
        ],
    );
    db
}

/// A table whose value column holds text, for type-mismatch tests.
pub fn notes_db() -> MemoryDb {
    let mut db = MemoryDb::new();
    db.add_table(
        "notes",
        &[
            ("author", ColumnKind::Text),
            ("body", ColumnKind::Text),
        ],
        vec![
            vec![text("E"), text("hello")],
            vec![text("E"), text("world")],
        ],
    );
    db
}
