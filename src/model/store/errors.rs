use std::io;

use thiserror::Error;

/// An infrastructure failure in the backing store. Distinct from business
/// rejections: these always surface as internal errors, never as a
/// validation outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
