//! Static table metadata and the record mapping consumed by the mutation
//! statement builders.

use crate::param::Param;

/// Static description of a table: name, declared columns, primary key.
///
/// Const-constructible so models can expose their schema without
/// allocation:
///
/// ```ignore
/// const USERS: Schema = Schema::new("users")
///     .with_fields(&["id", "username", "email"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    table: &'static str,
    fields: &'static [&'static str],
    primary_key: &'static str,
}

impl Schema {
    /// Create a schema for the given table. The field list starts empty
    /// and the primary key defaults to `id`.
    pub const fn new(table: &'static str) -> Self {
        Self {
            table,
            fields: &[],
            primary_key: "id",
        }
    }

    /// Set the declared column list, in select-expansion order.
    pub const fn with_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.fields = fields;
        self
    }

    /// Set the primary key column.
    pub const fn with_primary_key(mut self, primary_key: &'static str) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Table name.
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Declared columns in order.
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Primary key column.
    pub const fn primary_key(&self) -> &'static str {
        self.primary_key
    }
}

/// Record-to-columns mapping consumed by the INSERT/UPDATE/DELETE builders.
///
/// `values()` yields one entry per writable column, in declaration order,
/// and may include the primary key: an app-assigned key rides into INSERT
/// like any other column, while UPDATE skips the key entry by name and
/// addresses the row with it instead. `None` means the column has no
/// value to send: INSERT omits it so the database default applies, UPDATE
/// skips the assignment. A column that must be written as SQL NULL
/// carries a typed `None` inside its `Param`, e.g.
/// `Param::new(None::<String>)`.
pub trait Model {
    /// Static schema for this model's table.
    fn schema() -> Schema;

    /// Column values, in declaration order.
    fn values(&self) -> Vec<(&'static str, Option<Param>)>;

    /// The record's primary key value.
    fn primary_key_value(&self) -> Param;
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS: Schema = Schema::new("users")
        .with_fields(&["id", "username", "email"])
        .with_primary_key("id");

    #[test]
    fn const_schema_exposes_metadata() {
        assert_eq!(USERS.table(), "users");
        assert_eq!(USERS.fields(), &["id", "username", "email"]);
        assert_eq!(USERS.primary_key(), "id");
    }

    #[test]
    fn primary_key_defaults_to_id() {
        const BARE: Schema = Schema::new("bare");
        assert_eq!(BARE.primary_key(), "id");
        assert!(BARE.fields().is_empty());
    }
}
