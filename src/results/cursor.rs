use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::{DataApiError, Result};
use crate::types::FetchMode;
use crate::wire::StatementResponse;

use super::row::{Columns, CustomDbRow};

/// Result of a fetch in either mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// The statement produced no result set, or `fetch_one` found no row left.
    None,
    One(CustomDbRow),
    All(Vec<CustomDbRow>),
}

impl Fetched {
    #[must_use]
    pub fn into_one(self) -> Option<CustomDbRow> {
        match self {
            Fetched::One(row) => Some(row),
            Fetched::None | Fetched::All(_) => None,
        }
    }

    /// `None` only when the statement had no result set; an empty result set is `Some(vec![])`.
    #[must_use]
    pub fn into_all(self) -> Option<Vec<CustomDbRow>> {
        match self {
            Fetched::All(rows) => Some(rows),
            Fetched::One(row) => Some(vec![row]),
            Fetched::None => None,
        }
    }
}

/// Decoded rows of one statement response, consumed front to back.
///
/// Built once from a response, which stays untouched. `fetch_one` pops the front row and
/// `fetch_all` drains whatever remains, so each row is handed out at most once.
#[derive(Debug, Clone, Default)]
pub struct ResultCursor {
    columns: Option<Arc<Columns>>,
    rows: VecDeque<CustomDbRow>,
}

impl ResultCursor {
    /// Decode every record of `response` against its column metadata.
    ///
    /// # Errors
    /// Returns `DataApiError::MalformedResponse` when metadata is present but `records` is absent,
    /// or when a record's width differs from the metadata.
    pub fn from_response(response: &StatementResponse) -> Result<Self> {
        let Some(metadata) = response
            .column_metadata
            .as_ref()
            .filter(|cols| !cols.is_empty())
        else {
            return Ok(Self::default());
        };

        let columns = Arc::new(Columns::new(
            metadata.iter().map(|col| col.label.clone()).collect(),
        ));

        let records = response.records.as_ref().ok_or_else(|| {
            DataApiError::MalformedResponse(
                "columnMetadata present but records missing; was includeResultMetadata set on a batch call?"
                    .to_string(),
            )
        })?;

        let mut rows = VecDeque::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record.len() != columns.len() {
                return Err(DataApiError::MalformedResponse(format!(
                    "record {idx} has {} values but {} columns were described",
                    record.len(),
                    columns.len()
                )));
            }
            let values = record.iter().map(|field| field.to_row_value()).collect();
            rows.push_back(CustomDbRow::new(Arc::clone(&columns), values));
        }

        Ok(Self {
            columns: Some(columns),
            rows,
        })
    }

    /// False for INSERT/UPDATE/DDL responses, which carry no column metadata.
    #[must_use]
    pub fn has_result_set(&self) -> bool {
        self.columns.is_some()
    }

    #[must_use]
    pub fn column_names(&self) -> Option<&[String]> {
        self.columns.as_deref().map(Columns::labels)
    }

    /// Rows not yet fetched.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub fn fetch_one(&mut self) -> Option<CustomDbRow> {
        if !self.has_result_set() {
            return None;
        }
        self.rows.pop_front()
    }

    pub fn fetch_all(&mut self) -> Option<Vec<CustomDbRow>> {
        if !self.has_result_set() {
            return None;
        }
        Some(self.rows.drain(..).collect())
    }

    pub fn fetch(&mut self, mode: FetchMode) -> Fetched {
        match mode {
            FetchMode::One => self.fetch_one().map_or(Fetched::None, Fetched::One),
            FetchMode::All => self.fetch_all().map_or(Fetched::None, Fetched::All),
        }
    }
}

/// Decode a response in one step, for callers that do not keep a cursor around.
///
/// # Errors
/// Propagates `DataApiError::MalformedResponse` from [`ResultCursor::from_response`].
pub fn decode_response(response: &StatementResponse, mode: FetchMode) -> Result<Fetched> {
    Ok(ResultCursor::from_response(response)?.fetch(mode))
}
