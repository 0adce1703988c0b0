use crate::error::{DataApiError, Result};
use crate::results::ResultCursor;
use crate::wire::{BatchStatementResponse, DataApiResponse, StatementResponse};

/// Per-client state a PyMySQL cursor would keep between calls.
///
/// Owned by exactly one [`DataApiClient`](super::DataApiClient). `returned_ids` is append-only
/// across every `execute_many` call for the lifetime of the session.
#[derive(Debug, Default)]
pub struct SessionState {
    last_response: Option<DataApiResponse>,
    cursor: Option<ResultCursor>,
    affected_rows: Option<usize>,
    returned_ids: Vec<i64>,
    last_insert_id: Option<i64>,
}

impl SessionState {
    #[must_use]
    pub fn last_response(&self) -> Option<&DataApiResponse> {
        self.last_response.as_ref()
    }

    #[must_use]
    pub fn affected_rows(&self) -> Option<usize> {
        self.affected_rows
    }

    #[must_use]
    pub fn returned_ids(&self) -> &[i64] {
        &self.returned_ids
    }

    #[must_use]
    pub fn last_insert_id(&self) -> Option<i64> {
        self.last_insert_id
    }

    pub(crate) fn record_statement(
        &mut self,
        query: &str,
        response: StatementResponse,
    ) -> Result<usize> {
        let affected = usize::try_from(response.number_of_records_updated).map_err(|_| {
            DataApiError::MalformedResponse(format!(
                "numberOfRecordsUpdated is negative: {}",
                response.number_of_records_updated
            ))
        })?;

        // The first generated field is taken to be the primary key.
        if query.to_uppercase().contains("INSERT")
            && let Some(field) = response.generated_fields.first()
        {
            match field.as_long() {
                Some(id) => self.last_insert_id = Some(id),
                None => tracing::debug!(
                    tag = field.tag(),
                    "generated field is not a longValue; last insert id unchanged"
                ),
            }
        }

        self.affected_rows = Some(affected);
        self.set_response(DataApiResponse::Statement(response));
        Ok(affected)
    }

    pub(crate) fn record_batch(&mut self, response: BatchStatementResponse) -> usize {
        // Some responses report a generated id of 0 for rows that generated nothing.
        let ids = response
            .update_results
            .iter()
            .filter_map(|result| result.generated_fields.first())
            .filter_map(|field| field.as_long())
            .filter(|id| *id != 0);
        self.returned_ids.extend(ids);

        let affected = response.update_results.len();
        self.affected_rows = Some(affected);
        self.set_response(DataApiResponse::Batch(response));
        affected
    }

    /// Cursor over the last response, decoded on first use.
    pub(crate) fn cursor_mut(&mut self) -> Result<&mut ResultCursor> {
        if self.cursor.is_none() {
            let cursor = match &self.last_response {
                Some(DataApiResponse::Statement(response)) => {
                    ResultCursor::from_response(response)?
                }
                Some(DataApiResponse::Batch(_)) => ResultCursor::default(),
                None => {
                    return Err(DataApiError::ExecutionError(
                        "fetch called before any statement was executed".to_string(),
                    ));
                }
            };
            self.cursor = Some(cursor);
        }
        self.cursor.as_mut().ok_or_else(|| {
            DataApiError::ExecutionError("result cursor unavailable".to_string())
        })
    }

    fn set_response(&mut self, response: DataApiResponse) {
        self.last_response = Some(response);
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Field, UpdateResult};

    #[test]
    fn batch_ids_skip_zero_and_empty_results() {
        let mut session = SessionState::default();
        let response = BatchStatementResponse {
            update_results: vec![
                UpdateResult {
                    generated_fields: vec![Field::LongValue(0)],
                },
                UpdateResult {
                    generated_fields: vec![Field::LongValue(5)],
                },
                UpdateResult {
                    generated_fields: vec![],
                },
            ],
        };
        assert_eq!(session.record_batch(response), 3);
        assert_eq!(session.returned_ids(), &[5_i64]);
        assert_eq!(session.affected_rows(), Some(3));
    }

    #[test]
    fn insert_id_only_captured_for_inserts() {
        let mut session = SessionState::default();
        let response = StatementResponse {
            number_of_records_updated: 1,
            generated_fields: vec![Field::LongValue(42)],
            ..StatementResponse::default()
        };
        session
            .record_statement("update t set a = 1", response.clone())
            .unwrap();
        assert_eq!(session.last_insert_id(), None);

        session
            .record_statement("insert into t values (1)", response)
            .unwrap();
        assert_eq!(session.last_insert_id(), Some(42));
    }

    #[test]
    fn negative_update_count_is_malformed() {
        let mut session = SessionState::default();
        let response = StatementResponse {
            number_of_records_updated: -1,
            ..StatementResponse::default()
        };
        assert!(matches!(
            session.record_statement("DELETE FROM t", response),
            Err(DataApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn fetch_before_execute_is_an_error() {
        let mut session = SessionState::default();
        assert!(matches!(
            session.cursor_mut(),
            Err(DataApiError::ExecutionError(_))
        ));
    }
}
