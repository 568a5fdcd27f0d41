//! Table alias assignment.

use crate::error::{ScribeError, ScribeResult};
use crate::query::Source;
use crate::schema::Schema;

/// One aliased table reference.
#[derive(Clone, Debug)]
pub struct AliasedSource {
    pub(crate) table: String,
    pub(crate) alias: String,
    pub(crate) schema: Schema,
}

impl AliasedSource {
    /// Assigned alias, e.g. `p0`.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Referenced table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Schema of the referenced table.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// The aliased sources of one query, ordered like its source list.
///
/// Index-to-alias lookup is explicit and bounds-checked: an out-of-range
/// source index is an internal error, never a panic and never guessed
/// SQL.
#[derive(Clone, Debug)]
pub struct AliasedSources(Vec<AliasedSource>);

impl AliasedSources {
    /// The aliased source at `index`.
    pub fn get(&self, index: usize) -> ScribeResult<&AliasedSource> {
        self.0.get(index).ok_or_else(|| {
            ScribeError::internal(format!(
                "source index {} out of range ({} sources)",
                index,
                self.0.len()
            ))
        })
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no sources.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the aliased sources in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AliasedSource> {
        self.0.iter()
    }
}

/// Assign each source a unique short alias.
///
/// The candidate alias for a table is its first character plus a numeric
/// suffix starting at 0; on collision with an alias already assigned in
/// this call the suffix is incremented until free. Deterministic: the
/// same source list always yields the same aliases.
pub fn alias_sources(sources: &[Source]) -> ScribeResult<AliasedSources> {
    let mut aliased: Vec<AliasedSource> = Vec::with_capacity(sources.len());

    for source in sources {
        let first = source
            .table()
            .chars()
            .next()
            .ok_or_else(|| ScribeError::internal("source with an empty table name"))?;

        // At most `len` aliases are ever assigned, so `len + 1` candidate
        // suffixes always contain a free one.
        let mut alias = None;
        for suffix in 0..=sources.len() {
            let candidate = format!("{}{}", first, suffix);
            if aliased.iter().all(|a| a.alias != candidate) {
                alias = Some(candidate);
                break;
            }
        }
        let alias = alias.ok_or_else(|| {
            ScribeError::internal(format!(
                "no free alias for table {:?} within {} candidates",
                source.table(),
                sources.len() + 1
            ))
        })?;

        aliased.push(AliasedSource {
            table: source.table().to_string(),
            alias,
            schema: *source.schema(),
        });
    }

    Ok(AliasedSources(aliased))
}
