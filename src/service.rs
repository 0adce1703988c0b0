use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::wire::{
    BatchExecuteStatementRequest, BatchStatementResponse, BeginTransactionRequest,
    BeginTransactionResponse, CommitTransactionRequest, CommitTransactionResponse,
    ExecuteStatementRequest, StatementResponse,
};

/// The four Data API verbs the middleware depends on.
///
/// `aws_sdk_rdsdata::Client` talks to the real service; tests plug in an in-memory
/// implementation. Implementations report malformed or unauthorized requests as
/// `DataApiError::RemoteRequestRejected`.
#[async_trait]
pub trait DataApiService: Send + Sync {
    async fn execute_statement(
        &self,
        request: ExecuteStatementRequest,
    ) -> Result<StatementResponse>;

    async fn batch_execute_statement(
        &self,
        request: BatchExecuteStatementRequest,
    ) -> Result<BatchStatementResponse>;

    async fn begin_transaction(
        &self,
        request: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse>;

    async fn commit_transaction(
        &self,
        request: CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse>;
}

#[async_trait]
impl<S: DataApiService + ?Sized> DataApiService for Arc<S> {
    async fn execute_statement(
        &self,
        request: ExecuteStatementRequest,
    ) -> Result<StatementResponse> {
        (**self).execute_statement(request).await
    }

    async fn batch_execute_statement(
        &self,
        request: BatchExecuteStatementRequest,
    ) -> Result<BatchStatementResponse> {
        (**self).batch_execute_statement(request).await
    }

    async fn begin_transaction(
        &self,
        request: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse> {
        (**self).begin_transaction(request).await
    }

    async fn commit_transaction(
        &self,
        request: CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse> {
        (**self).commit_transaction(request).await
    }
}
