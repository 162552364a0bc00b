use std::path::PathBuf;

use thiserror::Error;

/// Failures loading the product catalog. The ranking core itself is total:
/// once a catalog is in memory, no query can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("catalog invariant violation: {0}")]
    InvariantViolation(String),
}
