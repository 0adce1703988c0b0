use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that can be bound as query arguments or decoded from a result row.
///
/// Only `Text`, `Int`, `Float`, `Bool`, `Null` and `Timestamp` can be sent to the Data API;
/// `Blob` and `JSON` come back from `blobValue` and `arrayValue` columns, but binding one
/// fails with [`DataApiError::UnsupportedArgumentType`](crate::DataApiError).
/// ```rust
/// use rds_data_middleware::prelude::*;
///
/// let args = QueryArgs::positional(vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ]);
/// # let _ = args;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    /// Timestamps come back from the Data API as `stringValue`, so text is parsed too.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // "YYYY-MM-DD HH:MM:SS" with an optional fraction
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    /// Name of the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            RowValues::Int(_) => "Int",
            RowValues::Float(_) => "Float",
            RowValues::Text(_) => "Text",
            RowValues::Bool(_) => "Bool",
            RowValues::Timestamp(_) => "Timestamp",
            RowValues::Null => "Null",
            RowValues::JSON(_) => "JSON",
            RowValues::Blob(_) => "Blob",
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// Arguments for one statement, in the two shapes a PyMySQL-style driver accepts.
///
/// `Positional` pairs with `%s` markers, `Named` with `%(name)s` markers. Named arguments keep
/// their insertion order, which becomes the order of the encoded parameter list.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArgs {
    Positional(Vec<RowValues>),
    Named(Vec<(String, RowValues)>),
}

impl QueryArgs {
    #[must_use]
    pub fn positional(values: Vec<RowValues>) -> Self {
        QueryArgs::Positional(values)
    }

    pub fn named<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<RowValues>,
        I: IntoIterator<Item = (K, V)>,
    {
        QueryArgs::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            QueryArgs::Positional(values) => values.len(),
            QueryArgs::Named(pairs) => pairs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which cursor fetch a decode call mimics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// `fetchone()`: the next row, or nothing.
    One,
    /// `fetchall()`: every remaining row.
    All,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn option_converts_to_null() {
        let none: Option<i64> = None;
        assert_eq!(RowValues::from(none), RowValues::Null);
        assert_eq!(RowValues::from(Some(3_i64)), RowValues::Int(3));
    }

    #[test]
    fn text_timestamps_parse() {
        let value = RowValues::Text("2021-05-07 13:43:00.250".into());
        let expected = NaiveDate::from_ymd_opt(2021, 5, 7)
            .unwrap()
            .and_hms_milli_opt(13, 43, 0, 250)
            .unwrap();
        assert_eq!(value.as_timestamp(), Some(expected));
    }

    #[test]
    fn named_args_keep_insertion_order() {
        let args = QueryArgs::named([("b", RowValues::Int(2)), ("a", RowValues::Int(1))]);
        let QueryArgs::Named(pairs) = args else {
            panic!("expected named args");
        };
        assert_eq!(pairs[0].0, "b");
        assert_eq!(pairs[1].0, "a");
    }
}
