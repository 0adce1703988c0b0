//! PyMySQL-compatible cursor methods on top of the AWS RDS Data API.
//!
//! Code written for a blocking MySQL driver (`execute`, `executemany`, `fetchone`, `fetchall`,
//! `commit`) keeps working against the Data API, which has no connections, no `%s`
//! placeholders and returns typed JSON values instead of rows. This crate:
//!
//! - rewrites `%s` / `%(name)s` placeholders into `:name` parameters and encodes the arguments
//!   as tagged values ([`translation`], [`encoding`]);
//! - decodes `columnMetadata` + `records` back into label-keyed rows ([`results`]);
//! - keeps the cursor state a driver would keep ([`DataApiClient`]).
//!
//! ```rust,no_run
//! use rds_data_middleware::prelude::*;
//!
//! # async fn demo() -> Result<(), DataApiError> {
//! let mut client = DataApiClient::from_env().await?;
//! client
//!     .execute(
//!         "SELECT id, name FROM users WHERE id = %s",
//!         Some(&QueryArgs::positional(vec![RowValues::Int(1)])),
//!     )
//!     .await?;
//! if let Some(row) = client.fetch_one()? {
//!     println!("{:?}", row.get("name"));
//! }
//! # Ok(()) }
//! ```

#[cfg(feature = "aws")]
pub mod aws;
pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod results;
pub mod service;
pub mod translation;
pub mod types;
pub mod wire;

pub use client::{DataApiClient, SessionState};
pub use config::{Credentials, DataApiConfig, DataApiTarget};
pub use error::{DataApiError, RejectionKind, Result};
pub use executor::QueryExecutor;
pub use results::{CustomDbRow, Fetched, ResultCursor};
pub use service::DataApiService;
pub use types::{FetchMode, QueryArgs, RowValues};
