//! PyMySQL-style facade over the Data API.

mod session;

pub use session::SessionState;

use crate::config::DataApiTarget;
use crate::error::{DataApiError, Result};
use crate::executor::QueryExecutor;
use crate::results::{CustomDbRow, Fetched, decode_response};
use crate::service::DataApiService;
use crate::translation::translate_query;
use crate::types::{FetchMode, QueryArgs};
use crate::wire::{DataApiResponse, SqlParameter};

/// Cursor and connection methods of a blocking MySQL driver, mapped onto Data API calls.
///
/// Each method issues at most one request and awaits it. The client keeps a single
/// [`SessionState`] (last response, affected rows, generated ids), so one instance belongs to one
/// logical session; share the service handle, not the client.
///
/// # Examples
/// ```rust,no_run
/// use rds_data_middleware::prelude::*;
///
/// # async fn demo() -> Result<(), DataApiError> {
/// let mut client = DataApiClient::from_env().await?;
/// client
///     .execute(
///         "INSERT INTO users (name) VALUES (%(name)s)",
///         Some(&QueryArgs::named([("name", "Ann")])),
///     )
///     .await?;
/// client.commit();
///
/// client.execute("SELECT id, name FROM users", None).await?;
/// let rows = client.fetch_all()?.unwrap_or_default();
/// # let _ = rows;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct DataApiClient<S> {
    executor: QueryExecutor<S>,
    session: SessionState,
}

impl<S: DataApiService> DataApiClient<S> {
    pub fn new(service: S, target: DataApiTarget) -> Self {
        Self {
            executor: QueryExecutor::new(service, target),
            session: SessionState::default(),
        }
    }

    #[must_use]
    pub fn executor(&self) -> &QueryExecutor<S> {
        &self.executor
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// `cursor.execute()`: run one statement and return its affected-row count.
    ///
    /// For statements containing `INSERT`, the first generated field is kept as
    /// [`last_insert_id`](Self::last_insert_id).
    ///
    /// # Errors
    /// Returns translation errors before anything is sent, and service errors unchanged.
    pub async fn execute(&mut self, query: &str, args: Option<&QueryArgs>) -> Result<usize> {
        self.run_statement(query, args, None).await
    }

    /// `execute` inside an open transaction; the statement is not auto-committed.
    ///
    /// # Errors
    /// Same as [`execute`](Self::execute).
    pub async fn execute_in_transaction(
        &mut self,
        query: &str,
        args: Option<&QueryArgs>,
        transaction_id: &str,
    ) -> Result<usize> {
        self.run_statement(query, args, Some(transaction_id)).await
    }

    /// `cursor.executemany()`: run the query once per argument set in one batch call.
    ///
    /// Non-zero generated ids are appended to [`returned_ids`](Self::returned_ids). Returns the
    /// number of per-row results.
    ///
    /// # Errors
    /// Returns `DataApiError::ParameterError` when the argument sets rewrite the query
    /// differently, other translation errors, and service errors unchanged.
    pub async fn execute_many(&mut self, query: &str, args_list: &[QueryArgs]) -> Result<usize> {
        self.run_batch(query, args_list, None).await
    }

    /// `execute_many` inside an open transaction.
    ///
    /// # Errors
    /// Same as [`execute_many`](Self::execute_many).
    pub async fn execute_many_in_transaction(
        &mut self,
        query: &str,
        args_list: &[QueryArgs],
        transaction_id: &str,
    ) -> Result<usize> {
        self.run_batch(query, args_list, Some(transaction_id)).await
    }

    /// `cursor.fetchone()`: the next row of the last result set.
    ///
    /// # Errors
    /// Returns `DataApiError::ExecutionError` before any statement ran and
    /// `DataApiError::MalformedResponse` for undecodable responses.
    pub fn fetch_one(&mut self) -> Result<Option<CustomDbRow>> {
        Ok(self.session.cursor_mut()?.fetch_one())
    }

    /// `cursor.fetchall()`: every remaining row, or `None` when the last statement had no
    /// result set.
    ///
    /// # Errors
    /// Same as [`fetch_one`](Self::fetch_one).
    pub fn fetch_all(&mut self) -> Result<Option<Vec<CustomDbRow>>> {
        Ok(self.session.cursor_mut()?.fetch_all())
    }

    /// `connection.commit()`. Statements sent without a transaction id are auto-committed by the
    /// service, so there is nothing to do.
    pub fn commit(&self) {}

    /// `connection.affected_rows()`: the count recorded by the last execute call.
    #[must_use]
    pub fn affected_rows(&self) -> Option<usize> {
        self.session.affected_rows()
    }

    /// Generated ids collected by every `execute_many` call so far. Never cleared.
    #[must_use]
    pub fn returned_ids(&self) -> &[i64] {
        self.session.returned_ids()
    }

    /// `cursor.lastrowid`.
    #[must_use]
    pub fn last_insert_id(&self) -> Option<i64> {
        self.session.last_insert_id()
    }

    #[must_use]
    pub fn last_response(&self) -> Option<&DataApiResponse> {
        self.session.last_response()
    }

    /// Run a query and decode it right away, leaving the session untouched.
    ///
    /// # Errors
    /// Returns translation, service and decoding errors.
    pub async fn query(
        &self,
        query: &str,
        args: Option<&QueryArgs>,
        mode: FetchMode,
    ) -> Result<Fetched> {
        let (sql, parameters) = translate_optional(query, args)?;
        let response = self.executor.execute_once(&sql, parameters, None).await?;
        decode_response(&response, mode)
    }

    /// Start a transaction. `schema` defaults to the configured database.
    ///
    /// # Errors
    /// Returns service errors unchanged.
    pub async fn begin_transaction(&self, schema: Option<&str>) -> Result<String> {
        self.executor.begin_transaction(schema).await
    }

    /// # Errors
    /// Returns service errors unchanged.
    pub async fn commit_transaction(&self, transaction_id: &str) -> Result<bool> {
        self.executor.commit_transaction(transaction_id).await
    }

    async fn run_statement(
        &mut self,
        query: &str,
        args: Option<&QueryArgs>,
        transaction_id: Option<&str>,
    ) -> Result<usize> {
        let (sql, parameters) = translate_optional(query, args)?;
        let response = self
            .executor
            .execute_once(&sql, parameters, transaction_id)
            .await?;
        self.session.record_statement(query, response)
    }

    async fn run_batch(
        &mut self,
        query: &str,
        args_list: &[QueryArgs],
        transaction_id: Option<&str>,
    ) -> Result<usize> {
        let (sql, parameter_sets) = translate_batch(query, args_list)?;
        let response = self
            .executor
            .execute_batch(&sql, parameter_sets, transaction_id)
            .await?;
        Ok(self.session.record_batch(response))
    }
}

fn translate_optional(query: &str, args: Option<&QueryArgs>) -> Result<(String, Vec<SqlParameter>)> {
    match args {
        Some(args) => {
            let translated = translate_query(query, args)?;
            Ok((translated.sql, translated.parameters))
        }
        None => Ok((query.to_string(), Vec::new())),
    }
}

fn translate_batch(
    query: &str,
    args_list: &[QueryArgs],
) -> Result<(String, Vec<Vec<SqlParameter>>)> {
    let mut shared_sql: Option<String> = None;
    let mut parameter_sets = Vec::with_capacity(args_list.len());

    for (idx, args) in args_list.iter().enumerate() {
        let translated = translate_query(query, args)?;
        match &shared_sql {
            Some(sql) if *sql != translated.sql => {
                return Err(DataApiError::ParameterError(format!(
                    "argument set {idx} rewrites the query differently from argument set 0"
                )));
            }
            Some(_) => {}
            None => shared_sql = Some(translated.sql),
        }
        parameter_sets.push(translated.parameters);
    }

    Ok((shared_sql.unwrap_or_else(|| query.to_string()), parameter_sets))
}

#[cfg(feature = "aws")]
impl DataApiClient<aws_sdk_rdsdata::Client> {
    /// Build a client for the real service from the process environment.
    ///
    /// # Errors
    /// Returns `DataApiError::ConfigError` for missing or invalid settings.
    pub async fn from_env() -> Result<Self> {
        Ok(Self::from_config(&crate::config::DataApiConfig::from_env()?).await)
    }

    pub async fn from_config(config: &crate::config::DataApiConfig) -> Self {
        let service = crate::aws::sdk_client(config).await;
        Self::new(service, config.target.clone())
    }
}
