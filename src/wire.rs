//! Serde models for the Data API's JSON request and response bodies.
//!
//! Field names follow the service's camelCase wire names; everything the middleware reads is
//! modelled, everything else in a response is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RowValues;

/// A tagged value: a single-key object such as `{"longValue": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    StringValue(String),
    LongValue(i64),
    DoubleValue(f64),
    BooleanValue(bool),
    /// Base64 on the wire.
    BlobValue(#[serde(with = "base64_bytes")] Vec<u8>),
    /// Kept as the raw `{"longValues": [...]}` style object.
    ArrayValue(Value),
    /// Sent as `true`; the paired value is never inspected.
    IsNull(Value),
}

impl Field {
    /// The NULL marker as it is sent: `{"isNull": true}`.
    #[must_use]
    pub fn null() -> Self {
        Field::IsNull(Value::Bool(true))
    }

    /// The wire tag of this value.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Field::StringValue(_) => "stringValue",
            Field::LongValue(_) => "longValue",
            Field::DoubleValue(_) => "doubleValue",
            Field::BooleanValue(_) => "booleanValue",
            Field::BlobValue(_) => "blobValue",
            Field::ArrayValue(_) => "arrayValue",
            Field::IsNull(_) => "isNull",
        }
    }

    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        if let Field::LongValue(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    /// Unwrap the tagged value into a plain row value.
    #[must_use]
    pub fn to_row_value(&self) -> RowValues {
        match self {
            Field::StringValue(s) => RowValues::Text(s.clone()),
            Field::LongValue(i) => RowValues::Int(*i),
            Field::DoubleValue(f) => RowValues::Float(*f),
            Field::BooleanValue(b) => RowValues::Bool(*b),
            Field::BlobValue(bytes) => RowValues::Blob(bytes.clone()),
            Field::ArrayValue(array) => RowValues::JSON(array.clone()),
            Field::IsNull(_) => RowValues::Null,
        }
    }
}

mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded.as_bytes()).map_err(de::Error::custom)
    }
}

/// Hint telling the service how to interpret a `stringValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeHint {
    Timestamp,
}

/// One named parameter of a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlParameter {
    pub name: String,
    pub value: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<TypeHint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl ColumnMetadata {
    #[must_use]
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

/// Response of `ExecuteStatement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    /// Absent or empty for statements that produce no result set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_metadata: Option<Vec<ColumnMetadata>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Vec<Field>>>,
    #[serde(default)]
    pub number_of_records_updated: i64,
    #[serde(default)]
    pub generated_fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    #[serde(default)]
    pub generated_fields: Vec<Field>,
}

/// Response of `BatchExecuteStatement`: one entry per parameter set, never any rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatementResponse {
    #[serde(default)]
    pub update_results: Vec<UpdateResult>,
}

/// Whichever response the last facade call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DataApiResponse {
    Statement(StatementResponse),
    Batch(BatchStatementResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub database: String,
    pub sql: String,
    pub parameters: Vec<SqlParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub include_result_metadata: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExecuteStatementRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub database: String,
    pub sql: String,
    pub parameter_sets: Vec<Vec<SqlParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub database: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionResponse {
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionResponse {
    #[serde(default)]
    pub transaction_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameters_serialize_with_wire_names() {
        let param = SqlParameter {
            name: "created".into(),
            value: Field::StringValue("2021-05-07 13:43:00".into()),
            type_hint: Some(TypeHint::Timestamp),
        };
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "name": "created",
                "value": {"stringValue": "2021-05-07 13:43:00"},
                "typeHint": "TIMESTAMP"
            })
        );

        let null = SqlParameter {
            name: "x".into(),
            value: Field::null(),
            type_hint: None,
        };
        assert_eq!(
            serde_json::to_value(&null).unwrap(),
            json!({"name": "x", "value": {"isNull": true}})
        );
    }

    #[test]
    fn statement_response_tolerates_missing_fields() {
        let resp: StatementResponse =
            serde_json::from_value(json!({"numberOfRecordsUpdated": 2})).unwrap();
        assert!(resp.column_metadata.is_none());
        assert!(resp.records.is_none());
        assert!(resp.generated_fields.is_empty());
        assert_eq!(resp.number_of_records_updated, 2);
    }

    #[test]
    fn statement_response_reads_rows() {
        let resp: StatementResponse = serde_json::from_value(json!({
            "columnMetadata": [{"label": "id", "typeName": "INT"}, {"label": "name"}],
            "records": [[{"longValue": 1}, {"isNull": true}]],
            "numberOfRecordsUpdated": 0,
            "ResponseMetadata": {"HTTPStatusCode": 200}
        }))
        .unwrap();
        let cols = resp.column_metadata.unwrap();
        assert_eq!(cols[0].label, "id");
        assert_eq!(cols[0].type_name.as_deref(), Some("INT"));
        assert_eq!(
            resp.records.unwrap(),
            vec![vec![Field::LongValue(1), Field::null()]]
        );
    }

    #[test]
    fn reads_blob_array_and_odd_null_values() {
        let resp: StatementResponse = serde_json::from_value(json!({
            "columnMetadata": [{"label": "b"}, {"label": "a"}, {"label": "n"}],
            "records": [[
                {"blobValue": "AAE="},
                {"arrayValue": {"longValues": [1, 2]}},
                {"isNull": 1}
            ]]
        }))
        .unwrap();
        let row = &resp.records.unwrap()[0];
        assert_eq!(row[0], Field::BlobValue(vec![0, 1]));
        assert_eq!(row[0].to_row_value(), RowValues::Blob(vec![0, 1]));
        assert_eq!(
            row[1].to_row_value(),
            RowValues::JSON(json!({"longValues": [1, 2]}))
        );
        assert_eq!(row[2].to_row_value(), RowValues::Null);
    }

    #[test]
    fn invalid_base64_blob_is_rejected() {
        assert!(serde_json::from_value::<Field>(json!({"blobValue": "not base64!"})).is_err());
    }

    #[test]
    fn request_omits_absent_transaction() {
        let req = CommitTransactionRequest {
            resource_arn: "arn:cluster".into(),
            secret_arn: "arn:secret".into(),
            transaction_id: "tx-1".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"resourceArn": "arn:cluster", "secretArn": "arn:secret", "transactionId": "tx-1"})
        );

        let exec = ExecuteStatementRequest {
            resource_arn: "r".into(),
            secret_arn: "s".into(),
            database: "db".into(),
            sql: "SELECT 1".into(),
            parameters: vec![],
            transaction_id: None,
            include_result_metadata: true,
        };
        let value = serde_json::to_value(&exec).unwrap();
        assert!(value.get("transactionId").is_none());
        assert_eq!(value["includeResultMetadata"], json!(true));
    }
}
