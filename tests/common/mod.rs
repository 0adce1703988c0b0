#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rds_data_middleware::error::Result;
use rds_data_middleware::wire::{
    BatchExecuteStatementRequest, BatchStatementResponse, BeginTransactionRequest,
    BeginTransactionResponse, CommitTransactionRequest, CommitTransactionResponse,
    ExecuteStatementRequest, StatementResponse,
};
use rds_data_middleware::{DataApiClient, DataApiService, DataApiTarget};

/// In-memory Data API that records every request and replays queued responses.
#[derive(Default)]
pub struct MockDataApi {
    pub executed: Mutex<Vec<ExecuteStatementRequest>>,
    pub batches: Mutex<Vec<BatchExecuteStatementRequest>>,
    pub begun: Mutex<Vec<BeginTransactionRequest>>,
    pub committed: Mutex<Vec<CommitTransactionRequest>>,
    statement_responses: Mutex<VecDeque<Result<StatementResponse>>>,
    batch_responses: Mutex<VecDeque<Result<BatchStatementResponse>>>,
}

impl MockDataApi {
    pub fn push_statement(&self, response: Result<StatementResponse>) {
        self.statement_responses.lock().unwrap().push_back(response);
    }

    /// Queue a statement response written as Data API JSON.
    pub fn push_statement_json(&self, value: serde_json::Value) {
        self.push_statement(Ok(serde_json::from_value(value).unwrap()));
    }

    pub fn push_batch(&self, response: Result<BatchStatementResponse>) {
        self.batch_responses.lock().unwrap().push_back(response);
    }

    pub fn push_batch_json(&self, value: serde_json::Value) {
        self.push_batch(Ok(serde_json::from_value(value).unwrap()));
    }

    pub fn last_executed(&self) -> ExecuteStatementRequest {
        self.executed.lock().unwrap().last().cloned().unwrap()
    }

    pub fn last_batch(&self) -> BatchExecuteStatementRequest {
        self.batches.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl DataApiService for MockDataApi {
    async fn execute_statement(
        &self,
        request: ExecuteStatementRequest,
    ) -> Result<StatementResponse> {
        self.executed.lock().unwrap().push(request);
        self.statement_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(StatementResponse::default()))
    }

    async fn batch_execute_statement(
        &self,
        request: BatchExecuteStatementRequest,
    ) -> Result<BatchStatementResponse> {
        self.batches.lock().unwrap().push(request);
        self.batch_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(BatchStatementResponse::default()))
    }

    async fn begin_transaction(
        &self,
        request: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse> {
        let mut begun = self.begun.lock().unwrap();
        begun.push(request);
        Ok(BeginTransactionResponse {
            transaction_id: format!("tx-{}", begun.len()),
        })
    }

    async fn commit_transaction(
        &self,
        request: CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse> {
        self.committed.lock().unwrap().push(request);
        Ok(CommitTransactionResponse {
            transaction_status: Some("Transaction Committed".to_string()),
        })
    }
}

pub fn target() -> DataApiTarget {
    DataApiTarget {
        resource_arn: "arn:aws:rds:eu-west-1:123456789012:cluster:app".to_string(),
        secret_arn: "arn:aws:secretsmanager:eu-west-1:123456789012:secret:app".to_string(),
        database: "app".to_string(),
    }
}

pub fn client() -> (Arc<MockDataApi>, DataApiClient<Arc<MockDataApi>>) {
    let api = Arc::new(MockDataApi::default());
    let client = DataApiClient::new(Arc::clone(&api), target());
    (api, client)
}
