//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::client::DataApiClient;
pub use crate::config::{DataApiConfig, DataApiTarget};
pub use crate::error::{DataApiError, RejectionKind};
pub use crate::results::{CustomDbRow, Fetched};
pub use crate::service::DataApiService;
pub use crate::translation::{PlaceholderStyle, TranslatedQuery, translate_query};
pub use crate::types::{FetchMode, QueryArgs, RowValues};
pub use crate::wire::{Field, SqlParameter};

#[cfg(feature = "aws")]
pub use crate::aws::sdk_client;
