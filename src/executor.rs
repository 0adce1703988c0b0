use crate::config::DataApiTarget;
use crate::error::{DataApiError, Result};
use crate::service::DataApiService;
use crate::wire::{
    BatchExecuteStatementRequest, BatchStatementResponse, BeginTransactionRequest,
    CommitTransactionRequest, ExecuteStatementRequest, SqlParameter, StatementResponse,
};

/// Issues already-translated statements against one target.
///
/// No retries: a rejected request is logged with its SQL and returned to the caller as is.
#[derive(Debug, Clone)]
pub struct QueryExecutor<S> {
    service: S,
    target: DataApiTarget,
}

impl<S: DataApiService> QueryExecutor<S> {
    pub fn new(service: S, target: DataApiTarget) -> Self {
        Self { service, target }
    }

    #[must_use]
    pub fn target(&self) -> &DataApiTarget {
        &self.target
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run one statement, always asking for column metadata.
    ///
    /// With a `transaction_id` the statement joins that transaction and is not auto-committed.
    ///
    /// # Errors
    /// Returns whatever the service reports, including `DataApiError::RemoteRequestRejected`.
    pub async fn execute_once(
        &self,
        sql: &str,
        parameters: Vec<SqlParameter>,
        transaction_id: Option<&str>,
    ) -> Result<StatementResponse> {
        tracing::debug!(
            sql,
            parameters = parameters.len(),
            transaction_id,
            "ExecuteStatement"
        );
        let request = ExecuteStatementRequest {
            resource_arn: self.target.resource_arn.clone(),
            secret_arn: self.target.secret_arn.clone(),
            database: self.target.database.clone(),
            sql: sql.to_string(),
            parameters,
            transaction_id: transaction_id.map(str::to_string),
            include_result_metadata: true,
        };
        self.service
            .execute_statement(request)
            .await
            .map_err(|err| log_rejection(err, sql))
    }

    /// Run one statement once per parameter set.
    ///
    /// # Errors
    /// Returns whatever the service reports, including `DataApiError::RemoteRequestRejected`.
    pub async fn execute_batch(
        &self,
        sql: &str,
        parameter_sets: Vec<Vec<SqlParameter>>,
        transaction_id: Option<&str>,
    ) -> Result<BatchStatementResponse> {
        tracing::debug!(
            sql,
            parameter_sets = parameter_sets.len(),
            transaction_id,
            "BatchExecuteStatement"
        );
        let request = BatchExecuteStatementRequest {
            resource_arn: self.target.resource_arn.clone(),
            secret_arn: self.target.secret_arn.clone(),
            database: self.target.database.clone(),
            sql: sql.to_string(),
            parameter_sets,
            transaction_id: transaction_id.map(str::to_string),
        };
        self.service
            .batch_execute_statement(request)
            .await
            .map_err(|err| log_rejection(err, sql))
    }

    /// Open a transaction; `schema` defaults to the target database.
    ///
    /// # Errors
    /// Returns whatever the service reports.
    pub async fn begin_transaction(&self, schema: Option<&str>) -> Result<String> {
        let request = BeginTransactionRequest {
            resource_arn: self.target.resource_arn.clone(),
            secret_arn: self.target.secret_arn.clone(),
            database: self.target.database.clone(),
            schema: schema.unwrap_or(self.target.database.as_str()).to_string(),
        };
        let response = self.service.begin_transaction(request).await?;
        tracing::debug!(transaction_id = %response.transaction_id, "BeginTransaction");
        Ok(response.transaction_id)
    }

    /// # Errors
    /// Returns whatever the service reports.
    pub async fn commit_transaction(&self, transaction_id: &str) -> Result<bool> {
        tracing::debug!(transaction_id, "CommitTransaction");
        let request = CommitTransactionRequest {
            resource_arn: self.target.resource_arn.clone(),
            secret_arn: self.target.secret_arn.clone(),
            transaction_id: transaction_id.to_string(),
        };
        self.service.commit_transaction(request).await?;
        Ok(true)
    }
}

fn log_rejection(err: DataApiError, sql: &str) -> DataApiError {
    if err.is_rejection() {
        tracing::error!(error = %err, statement = sql, "Data API rejected statement");
    }
    err
}
