use thiserror::Error;

pub const MAX_UPSTREAM_BYTES: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("upstream body too large: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },
}

pub type LimitResult<T> = Result<T, LimitError>;

pub fn enforce_max_body_size(len: usize) -> LimitResult<()> {
    enforce_body_size(len, MAX_UPSTREAM_BYTES)
}

/// Same check against a caller-chosen cap (configured per client).
pub fn enforce_body_size(len: usize, max: usize) -> LimitResult<()> {
    if len > max {
        return Err(LimitError::TooLarge { max, actual: len });
    }
    Ok(())
}
