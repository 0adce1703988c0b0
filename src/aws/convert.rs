//! Conversions between the SDK's generated types and the crate's wire model.

use aws_sdk_rdsdata::operation::batch_execute_statement::BatchExecuteStatementOutput;
use aws_sdk_rdsdata::operation::execute_statement::ExecuteStatementOutput;
use aws_sdk_rdsdata::primitives::Blob;
use aws_sdk_rdsdata::types as sdk;
use serde_json::{Value, json};

use crate::error::{DataApiError, Result};
use crate::wire::{
    BatchStatementResponse, ColumnMetadata, Field, SqlParameter, StatementResponse, TypeHint,
    UpdateResult,
};

pub(super) fn parameter_to_sdk(parameter: SqlParameter) -> Result<sdk::SqlParameter> {
    let type_hint = match parameter.type_hint {
        Some(TypeHint::Timestamp) => Some(sdk::TypeHint::Timestamp),
        None => None,
    };
    let value = field_to_sdk(parameter.value).map_err(|e| match e {
        DataApiError::ParameterError(msg) => {
            DataApiError::ParameterError(format!("parameter `{}`: {msg}", parameter.name))
        }
        other => other,
    })?;
    Ok(sdk::SqlParameter::builder()
        .name(parameter.name)
        .value(value)
        .set_type_hint(type_hint)
        .build())
}

pub(super) fn parameter_sets_to_sdk(
    sets: Vec<Vec<SqlParameter>>,
) -> Result<Vec<Vec<sdk::SqlParameter>>> {
    sets.into_iter()
        .map(|set| set.into_iter().map(parameter_to_sdk).collect::<Result<Vec<_>>>())
        .collect()
}

fn field_to_sdk(field: Field) -> Result<sdk::Field> {
    Ok(match field {
        Field::StringValue(s) => sdk::Field::StringValue(s),
        Field::LongValue(i) => sdk::Field::LongValue(i),
        Field::DoubleValue(f) => sdk::Field::DoubleValue(f),
        Field::BooleanValue(b) => sdk::Field::BooleanValue(b),
        Field::BlobValue(bytes) => sdk::Field::BlobValue(Blob::new(bytes)),
        Field::IsNull(_) => sdk::Field::IsNull(true),
        Field::ArrayValue(_) => {
            return Err(DataApiError::ParameterError(
                "array values cannot be bound".to_string(),
            ));
        }
    })
}

pub(super) fn field_from_sdk(field: sdk::Field) -> Result<Field> {
    Ok(match field {
        sdk::Field::StringValue(s) => Field::StringValue(s),
        sdk::Field::LongValue(i) => Field::LongValue(i),
        sdk::Field::DoubleValue(f) => Field::DoubleValue(f),
        sdk::Field::BooleanValue(b) => Field::BooleanValue(b),
        sdk::Field::BlobValue(blob) => Field::BlobValue(blob.into_inner()),
        sdk::Field::ArrayValue(array) => Field::ArrayValue(array_to_json(array)?),
        sdk::Field::IsNull(flag) => Field::IsNull(Value::Bool(flag)),
        other => {
            return Err(DataApiError::MalformedResponse(format!(
                "unrecognised field value {other:?}"
            )));
        }
    })
}

fn fields_from_sdk(fields: Option<Vec<sdk::Field>>) -> Result<Vec<Field>> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(field_from_sdk)
        .collect()
}

/// Same shape the service uses in JSON, e.g. `{"longValues": [1, 2]}`.
fn array_to_json(array: sdk::ArrayValue) -> Result<Value> {
    Ok(match array {
        sdk::ArrayValue::ArrayValues(nested) => {
            let nested = nested
                .into_iter()
                .map(|item| item.map(array_to_json).transpose())
                .collect::<Result<Vec<Option<Value>>>>()?;
            json!({ "arrayValues": nested })
        }
        sdk::ArrayValue::BooleanValues(values) => json!({ "booleanValues": values }),
        sdk::ArrayValue::DoubleValues(values) => json!({ "doubleValues": values }),
        sdk::ArrayValue::LongValues(values) => json!({ "longValues": values }),
        sdk::ArrayValue::StringValues(values) => json!({ "stringValues": values }),
        other => {
            return Err(DataApiError::MalformedResponse(format!(
                "unrecognised array value {other:?}"
            )));
        }
    })
}

pub(super) fn column_from_sdk(column: sdk::ColumnMetadata) -> ColumnMetadata {
    ColumnMetadata {
        label: column.label.unwrap_or_default(),
        name: column.name,
        type_name: column.type_name,
    }
}

pub(super) fn statement_from_sdk(output: ExecuteStatementOutput) -> Result<StatementResponse> {
    let column_metadata = output
        .column_metadata
        .map(|columns| columns.into_iter().map(column_from_sdk).collect());
    let records = output
        .records
        .map(|records| {
            records
                .into_iter()
                .map(|record| record.into_iter().map(field_from_sdk).collect::<Result<Vec<_>>>())
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    Ok(StatementResponse {
        column_metadata,
        records,
        number_of_records_updated: output.number_of_records_updated,
        generated_fields: fields_from_sdk(output.generated_fields)?,
    })
}

pub(super) fn batch_from_sdk(output: BatchExecuteStatementOutput) -> Result<BatchStatementResponse> {
    let update_results = output
        .update_results
        .unwrap_or_default()
        .into_iter()
        .map(|result| {
            Ok(UpdateResult {
                generated_fields: fields_from_sdk(result.generated_fields)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(BatchStatementResponse { update_results })
}
