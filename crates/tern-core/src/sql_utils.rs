//! SQL quoting utilities
//!
//! The ledger queries are built as plain SQL text, so identifiers from
//! configuration and script names from the filesystem go through these
//! helpers before they are spliced into a statement.

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use tern_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("tern_migrations"), r#""tern_migrations""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a schema-qualified name, each part separately.
///
/// # Examples
/// ```
/// use tern_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("main", "tern_migrations"), r#""main"."tern_migrations""#);
/// ```
pub fn quote_qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}

/// Render a value as a single-quoted SQL string literal.
///
/// # Examples
/// ```
/// use tern_core::sql_utils::quote_literal;
/// assert_eq!(quote_literal("it's"), "'it''s'");
/// ```
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
