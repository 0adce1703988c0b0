//! Argument encoding into the Data API's tagged-value parameters.

use crate::error::{DataApiError, Result};
use crate::types::RowValues;
use crate::wire::{Field, SqlParameter, TypeHint};

/// Format the service accepts for `TIMESTAMP` string parameters.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Encode one named argument.
///
/// Null is checked first, then booleans ahead of integers, so a `Bool` can never be sent as a
/// `longValue`. Timestamps travel as strings with a `TIMESTAMP` type hint.
///
/// # Errors
/// Returns `DataApiError::UnsupportedArgumentType` for `JSON` and `Blob` values.
pub fn encode_argument(name: &str, value: &RowValues) -> Result<SqlParameter> {
    let (value, type_hint) = match value {
        RowValues::Null => (Field::null(), None),
        RowValues::Bool(b) => (Field::BooleanValue(*b), None),
        RowValues::Int(i) => (Field::LongValue(*i), None),
        RowValues::Float(f) => (Field::DoubleValue(*f), None),
        RowValues::Timestamp(dt) => (
            Field::StringValue(dt.format(TIMESTAMP_FORMAT).to_string()),
            Some(TypeHint::Timestamp),
        ),
        RowValues::Text(s) => (Field::StringValue(s.clone()), None),
        other @ (RowValues::JSON(_) | RowValues::Blob(_)) => {
            return Err(DataApiError::UnsupportedArgumentType {
                name: name.to_string(),
                type_name: other.type_name(),
            });
        }
    };

    Ok(SqlParameter {
        name: name.to_string(),
        value,
        type_hint,
    })
}
