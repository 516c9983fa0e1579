//! FILENAME: report-engine/src/builder.rs
//! Query Builder - assembles the SQL statements a report needs.
//!
//! Every source query wraps the table in a bounded subquery
//! `(SELECT * FROM table [WHERE ...] LIMIT row_limit) AS sublist` so no
//! single query can pull more than the row cap. Literal values (the filter
//! value and the current page value) are bound parameters; identifiers are
//! only ever taken from a schema that passed the allow-list validation.
//!
//! Two statement shapes exist per schema:
//! - the aggregate query, where the database computes the summary with a
//!   native aggregate and GROUP BY, and
//! - the flat query, which selects the raw value field so the explicit
//!   aggregator can group in memory.

use datalayer::{SqlDialect, SqlValue, Statement};
use schema::PivotSchema;

/// Renders the SQL statements for one schema. Holds only borrowed state;
/// construct one per report computation.
pub struct QueryBuilder<'a> {
    schema: &'a PivotSchema,
    dialect: SqlDialect,
    row_limit: usize,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(schema: &'a PivotSchema, dialect: SqlDialect, row_limit: usize) -> Self {
        QueryBuilder {
            schema,
            dialect,
            row_limit,
        }
    }

    /// Row labels then column labels, comma separated. Used both as the
    /// leading select list and as the GROUP BY column list.
    fn label_list(&self) -> String {
        self.schema
            .group_labels()
            .collect::<Vec<&str>>()
            .join(", ")
    }

    /// The bounded, filtered source subquery. Pushes filter and page
    /// predicates into the subquery's WHERE so the row cap applies after
    /// filtering, and collects their literal values as bound parameters.
    fn bounded_source(&self, page_value: Option<&SqlValue>, params: &mut Vec<SqlValue>) -> String {
        let mut conditions: Vec<String> = Vec::new();

        if let Some(filter) = &self.schema.filter {
            conditions.push(format!(
                "{} = {}",
                filter.field,
                self.dialect.placeholder(params.len())
            ));
            params.push(SqlValue::Text(filter.value.clone()));
        }

        if let (Some(page_label), Some(value)) = (&self.schema.page_label, page_value) {
            conditions.push(format!(
                "{} = {}",
                page_label,
                self.dialect.placeholder(params.len())
            ));
            params.push(value.clone());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        format!(
            "(SELECT * FROM {}{} LIMIT {}) AS sublist",
            self.schema.table_name, where_clause, self.row_limit
        )
    }

    /// `GROUP BY` over the row and column labels. Empty when the schema has
    /// no grouping labels, which a validated schema never has.
    fn group_by_clause(&self) -> String {
        let labels = self.label_list();
        if labels.is_empty() {
            String::new()
        } else {
            format!(" GROUP BY {}", labels)
        }
    }

    /// `ORDER BY field ASC|DESC`, or nothing when the schema has no sort.
    fn sort_clause(&self) -> String {
        match &self.schema.sort {
            Some(sort) => format!(" ORDER BY {} {}", sort.field, sort.order.sql()),
            None => String::new(),
        }
    }

    /// The push-down statement: the database groups and computes the
    /// summary with the native aggregate `aggregate` over the value field.
    pub fn aggregate_query(&self, aggregate: &str, page_value: Option<&SqlValue>) -> Statement {
        let mut params = Vec::new();
        let source = self.bounded_source(page_value, &mut params);
        let sql = format!(
            "SELECT {}, {}({}) FROM {}{}{}",
            self.label_list(),
            aggregate,
            self.schema.value_field,
            source,
            self.group_by_clause(),
            self.sort_clause()
        );
        Statement::with_params(sql, params)
    }

    /// The explicit-aggregation statement: selects the grouping labels plus
    /// the raw value field with no SQL-side grouping, so every source row
    /// reaches the in-memory aggregator.
    pub fn flat_query(&self, page_value: Option<&SqlValue>) -> Statement {
        let mut params = Vec::new();
        let source = self.bounded_source(page_value, &mut params);
        let sql = format!(
            "SELECT {}, {} FROM {}{}",
            self.label_list(),
            self.schema.value_field,
            source,
            self.sort_clause()
        );
        Statement::with_params(sql, params)
    }

    /// The distinct page-value statement, or `None` when the schema has no
    /// page label. Deliberately unbounded: it inspects label values, not
    /// report rows.
    pub fn page_values_query(&self) -> Option<Statement> {
        let page_label = self.schema.page_label.as_ref()?;
        Some(Statement::new(format!(
            "SELECT DISTINCT {} FROM {}",
            page_label, self.schema.table_name
        )))
    }
}
