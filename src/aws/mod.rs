//! The real service, through `aws-sdk-rdsdata`.

mod convert;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_rdsdata::Client;
use aws_sdk_rdsdata::config::http::HttpResponse;
use aws_sdk_rdsdata::config::{Credentials, Region};
use aws_sdk_rdsdata::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::config::DataApiConfig;
use crate::error::{DataApiError, RejectionKind, Result};
use crate::service::DataApiService;
use crate::wire::{
    BatchExecuteStatementRequest, BatchStatementResponse, BeginTransactionRequest,
    BeginTransactionResponse, CommitTransactionRequest, CommitTransactionResponse,
    ExecuteStatementRequest, StatementResponse,
};

use convert::{batch_from_sdk, parameter_sets_to_sdk, parameter_to_sdk, statement_from_sdk};

const CREDENTIALS_PROVIDER: &str = "rds-data-middleware";

/// Build an SDK client from static credentials, region, optional endpoint and timeout.
pub async fn sdk_client(config: &DataApiConfig) -> Client {
    let credentials = Credentials::new(
        config.credentials.access_key_id.clone(),
        config.credentials.secret_access_key.clone(),
        config.credentials.session_token.clone(),
        None,
        CREDENTIALS_PROVIDER,
    );
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(config.timeout)
                .build(),
        );
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint.clone());
    }

    let shared = loader.load().await;
    tracing::debug!(
        region = %config.region,
        endpoint = config.endpoint.as_deref(),
        "created Data API client"
    );
    Client::new(&shared)
}

#[async_trait]
impl DataApiService for Client {
    async fn execute_statement(
        &self,
        request: ExecuteStatementRequest,
    ) -> Result<StatementResponse> {
        let parameters = request
            .parameters
            .into_iter()
            .map(parameter_to_sdk)
            .collect::<Result<Vec<_>>>()?;
        let output = self
            .execute_statement()
            .resource_arn(request.resource_arn)
            .secret_arn(request.secret_arn)
            .database(request.database)
            .sql(request.sql)
            .set_parameters(Some(parameters))
            .set_transaction_id(request.transaction_id)
            .include_result_metadata(request.include_result_metadata)
            .send()
            .await
            .map_err(|err| error_from_sdk("ExecuteStatement", &err))?;
        statement_from_sdk(output)
    }

    async fn batch_execute_statement(
        &self,
        request: BatchExecuteStatementRequest,
    ) -> Result<BatchStatementResponse> {
        let parameter_sets = parameter_sets_to_sdk(request.parameter_sets)?;
        let output = self
            .batch_execute_statement()
            .resource_arn(request.resource_arn)
            .secret_arn(request.secret_arn)
            .database(request.database)
            .sql(request.sql)
            .set_parameter_sets(Some(parameter_sets))
            .set_transaction_id(request.transaction_id)
            .send()
            .await
            .map_err(|err| error_from_sdk("BatchExecuteStatement", &err))?;
        batch_from_sdk(output)
    }

    async fn begin_transaction(
        &self,
        request: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse> {
        let output = self
            .begin_transaction()
            .resource_arn(request.resource_arn)
            .secret_arn(request.secret_arn)
            .database(request.database)
            .schema(request.schema)
            .send()
            .await
            .map_err(|err| error_from_sdk("BeginTransaction", &err))?;
        let transaction_id = output.transaction_id.ok_or_else(|| {
            DataApiError::MalformedResponse("BeginTransaction returned no transactionId".to_string())
        })?;
        Ok(BeginTransactionResponse { transaction_id })
    }

    async fn commit_transaction(
        &self,
        request: CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse> {
        let output = self
            .commit_transaction()
            .resource_arn(request.resource_arn)
            .secret_arn(request.secret_arn)
            .transaction_id(request.transaction_id)
            .send()
            .await
            .map_err(|err| error_from_sdk("CommitTransaction", &err))?;
        Ok(CommitTransactionResponse {
            transaction_status: output.transaction_status,
        })
    }
}

fn error_from_sdk<E>(action: &str, err: &SdkError<E, HttpResponse>) -> DataApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            classify(
                context.raw().status().as_u16(),
                service_err.code(),
                service_err.message().unwrap_or_default(),
            )
        }
        SdkError::ResponseError(_) => DataApiError::MalformedResponse(format!(
            "{action} response did not decode: {}",
            DisplayErrorContext(err)
        )),
        _ => DataApiError::ConnectionError(format!(
            "{action} request failed: {}",
            DisplayErrorContext(err)
        )),
    }
}

/// BadRequest and Forbidden are rejections of the statement; everything else is a remote error.
///
/// An untyped 400 or 403 is treated like its typed counterpart.
fn classify(status: u16, code: Option<&str>, message: &str) -> DataApiError {
    let kind = match code {
        Some("BadRequestException") => Some(RejectionKind::BadRequest),
        Some("ForbiddenException") => Some(RejectionKind::Forbidden),
        Some(_) => None,
        None => match status {
            400 => Some(RejectionKind::BadRequest),
            403 => Some(RejectionKind::Forbidden),
            _ => None,
        },
    };

    match (kind, code) {
        (Some(kind), _) => DataApiError::RemoteRequestRejected {
            kind,
            message: message.to_string(),
        },
        (None, Some(code)) => DataApiError::RemoteError {
            status,
            message: format!("{code}: {message}"),
        },
        (None, None) => DataApiError::RemoteError {
            status,
            message: message.to_string(),
        },
    }
}
