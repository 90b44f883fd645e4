//! Growth error type.
//!
//! Candidate rejection is not an error; the only failure mode surfaced to
//! callers is an invalid configuration caught before the loop starts.

use thiserror::Error;

use cg_core::CoreError;

#[derive(Debug, Error)]
pub enum GrowthError {
    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type GrowthResult<T> = Result<T, GrowthError>;
