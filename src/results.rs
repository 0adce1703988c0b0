//! Decoding of statement responses into `DictCursor`-style rows.

mod cursor;
mod row;

pub use cursor::{Fetched, ResultCursor, decode_response};
pub use row::{Columns, CustomDbRow};
