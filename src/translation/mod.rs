mod markers;

use crate::encoding::encode_argument;
use crate::error::{DataApiError, Result};
use crate::types::{QueryArgs, RowValues};
use crate::wire::SqlParameter;

use markers::{
    POSITIONAL_MARKER, has_named, has_positional, named_marker, remaining_named,
};

/// Placeholder syntax found in a PyMySQL-style query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `%s`, bound by position.
    Positional,
    /// `%(name)s`, bound by name.
    Named,
}

/// Detect which marker syntax a query uses. `%s` wins when both appear.
#[must_use]
pub fn detect_placeholder_style(sql: &str) -> Option<PlaceholderStyle> {
    if has_positional(sql) {
        Some(PlaceholderStyle::Positional)
    } else if has_named(sql) {
        Some(PlaceholderStyle::Named)
    } else {
        None
    }
}

/// A query rewritten to `:name` placeholders plus its encoded parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    pub sql: String,
    pub parameters: Vec<SqlParameter>,
}

/// Rewrite `%s` / `%(name)s` markers into the Data API's `:name` syntax and encode the
/// arguments alongside.
///
/// Positional argument `i` replaces the first remaining `%s` with `:parameter_i`. Named
/// arguments replace every `%(key)s` with `:key`. A count mismatch is not an error (the
/// service will reject the SQL); it is logged at `warn`.
/// ```rust
/// use rds_data_middleware::prelude::*;
///
/// let args = QueryArgs::positional(vec![RowValues::Int(1), RowValues::Text("x".into())]);
/// let translated = translate_query("SELECT * FROM t WHERE a = %s AND b = %s", &args)?;
/// assert_eq!(translated.sql, "SELECT * FROM t WHERE a = :parameter_0 AND b = :parameter_1");
/// assert_eq!(translated.parameters[1].name, "parameter_1");
/// # Ok::<(), DataApiError>(())
/// ```
///
/// # Errors
/// Returns `DataApiError::ParameterError` when arguments are supplied for a query without
/// markers, or when the argument shape does not match the marker syntax, and
/// `DataApiError::UnsupportedArgumentType` when an argument cannot be encoded.
pub fn translate_query(query: &str, args: &QueryArgs) -> Result<TranslatedQuery> {
    if args.is_empty() {
        return Ok(TranslatedQuery {
            sql: query.to_string(),
            parameters: Vec::new(),
        });
    }

    match (detect_placeholder_style(query), args) {
        (Some(PlaceholderStyle::Positional), QueryArgs::Positional(values)) => {
            translate_positional(query, values)
        }
        (Some(PlaceholderStyle::Named), QueryArgs::Named(pairs)) => translate_named(query, pairs),
        (Some(style), _) => Err(DataApiError::ParameterError(format!(
            "query uses {style:?} placeholders but {} arguments were supplied in the other form",
            args.len()
        ))),
        (None, _) => Err(DataApiError::ParameterError(format!(
            "query has no %s or %(name)s placeholders but {} arguments were supplied",
            args.len()
        ))),
    }
}

fn translate_positional(query: &str, values: &[RowValues]) -> Result<TranslatedQuery> {
    let mut sql = String::with_capacity(query.len() + values.len() * 12);
    let mut parameters = Vec::with_capacity(values.len());
    let mut rest = query;
    let mut unmatched = 0usize;

    for (index, value) in values.iter().enumerate() {
        let name = format!("parameter_{index}");
        if let Some(pos) = rest.find(POSITIONAL_MARKER) {
            sql.push_str(&rest[..pos]);
            sql.push(':');
            sql.push_str(&name);
            rest = &rest[pos + POSITIONAL_MARKER.len()..];
        } else {
            unmatched += 1;
        }
        parameters.push(encode_argument(&name, value)?);
    }
    sql.push_str(rest);

    let leftover = rest.matches(POSITIONAL_MARKER).count();
    if unmatched > 0 || leftover > 0 {
        tracing::warn!(
            arguments = values.len(),
            unmatched_arguments = unmatched,
            unfilled_markers = leftover,
            query,
            "positional argument count does not match %s markers"
        );
    }

    Ok(TranslatedQuery { sql, parameters })
}

fn translate_named(query: &str, pairs: &[(String, RowValues)]) -> Result<TranslatedQuery> {
    let mut sql = query.to_string();
    let mut parameters = Vec::with_capacity(pairs.len());

    for (key, value) in pairs {
        sql = sql.replace(&named_marker(key), &format!(":{key}"));
        parameters.push(encode_argument(key, value)?);
    }

    let leftover = remaining_named(&sql);
    if !leftover.is_empty() {
        tracing::warn!(
            missing = ?leftover,
            query,
            "named markers left without a matching argument"
        );
    }

    Ok(TranslatedQuery { sql, parameters })
}
