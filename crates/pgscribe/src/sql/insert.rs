//! INSERT statement generation.

use crate::error::ScribeResult;
use crate::param::ParamList;
use crate::schema::Model;
use crate::sql::quote_ident;

/// Generate an INSERT for `record`.
///
/// Columns whose value is absent are omitted so database defaults apply;
/// a record with no values at all inserts `DEFAULT VALUES`. A non-empty
/// `returning` set appends a RETURNING list. The returned values match
/// the VALUES placeholder order exactly.
pub fn insert<M: Model>(record: &M, returning: &[&str]) -> ScribeResult<(String, ParamList)> {
    let schema = M::schema();
    let mut columns: Vec<&'static str> = Vec::new();
    let mut params = ParamList::new();

    for (field, value) in record.values() {
        if let Some(param) = value {
            columns.push(field);
            params.push_param(param);
        }
    }

    let mut sql = format!("INSERT INTO {}", quote_ident(schema.table()));
    if columns.is_empty() {
        sql.push_str(" DEFAULT VALUES");
    } else {
        let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
        sql.push_str(&format!(
            " ({}) VALUES ({})",
            cols.join(", "),
            placeholders.join(", ")
        ));
    }
    if !returning.is_empty() {
        let cols: Vec<String> = returning.iter().map(|c| quote_ident(c)).collect();
        sql.push_str(&format!(" RETURNING {}", cols.join(", ")));
    }

    crate::sql::trace_sql("insert", &sql, params.len());
    Ok((sql, params))
}
