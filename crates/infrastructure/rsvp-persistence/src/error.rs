use thiserror::Error;

/// Why a snapshot could not be written or read.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode failure: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no usable state directory")]
    NoStateDir,
}
