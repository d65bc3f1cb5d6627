//! Identifiers and qualified names

use std::fmt;

use smol_str::SmolStr;

/// A table, column, schema or alias name
///
/// Regular identifiers compare case-insensitively; delimited identifiers
/// (written between double quotes) compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    /// Name without the surrounding double quotes
    pub name: SmolStr,
    pub delimited: bool,
}

impl Identifier {
    pub fn regular(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            delimited: false,
        }
    }

    pub fn delimited(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            delimited: true,
        }
    }

    /// Build from the raw text of a token (`foo` or `"Foo ""bar"""`)
    pub fn from_token_text(text: &str) -> Self {
        match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            Some(inner) => Self::delimited(inner.replace("\"\"", "\"")),
            None => Self::regular(text),
        }
    }

    /// Whether this identifier designates `name` (case-sensitive only
    /// when either side is delimited)
    pub fn matches(&self, other: &Identifier) -> bool {
        if self.delimited || other.delimited {
            self.name == other.name
        } else {
            self.name.eq_ignore_ascii_case(&other.name)
        }
    }

    /// Case-insensitive comparison with a plain name
    pub fn matches_name(&self, name: &str, case_sensitive: bool) -> bool {
        if self.delimited && case_sensitive {
            self.name == name
        } else {
            self.name.eq_ignore_ascii_case(name)
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.delimited {
            write!(f, "\"{}\"", self.name.replace('"', "\"\""))
        } else {
            f.write_str(&self.name)
        }
    }
}

/// A possibly qualified table name: `[[catalog.]schema.]table`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableName {
    pub catalog: Option<Identifier>,
    pub schema: Option<Identifier>,
    pub table: Identifier,
}

impl TableName {
    pub fn new(table: Identifier) -> Self {
        Self {
            catalog: None,
            schema: None,
            table,
        }
    }

    /// Build from 1 to 3 dotted parts, the last one being the table
    pub fn from_parts(mut parts: Vec<Identifier>) -> Option<Self> {
        let table = parts.pop()?;
        let schema = parts.pop();
        let catalog = parts.pop();
        if !parts.is_empty() {
            return None;
        }
        Some(Self {
            catalog,
            schema,
            table,
        })
    }

    /// Whether `other` (as written in a column qualifier) designates this table
    ///
    /// Parts missing from `other` are ignored.
    pub fn matches(&self, other: &TableName) -> bool {
        let part_matches = |mine: &Option<Identifier>, theirs: &Option<Identifier>| match (mine, theirs) {
            (_, None) => true,
            (Some(mine), Some(theirs)) => mine.matches(theirs),
            (None, Some(_)) => false,
        };
        self.table.matches(&other.table)
            && part_matches(&self.schema, &other.schema)
            && part_matches(&self.catalog, &other.catalog)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(catalog) = &self.catalog {
            write!(f, "{catalog}.")?;
        }
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        write!(f, "{}", self.table)
    }
}

/// A column reference: `[[[catalog.]schema.]table.]column`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRef {
    pub table: Option<TableName>,
    pub column: Identifier,
}

impl ColumnRef {
    pub fn new(column: Identifier) -> Self {
        Self {
            table: None,
            column,
        }
    }

    /// Build from 1 to 4 dotted parts, the last one being the column
    pub fn from_parts(mut parts: Vec<Identifier>) -> Option<Self> {
        let column = parts.pop()?;
        let table = if parts.is_empty() {
            None
        } else {
            Some(TableName::from_parts(parts)?)
        };
        Some(Self { table, column })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{table}.")?;
        }
        write!(f, "{}", self.column)
    }
}
