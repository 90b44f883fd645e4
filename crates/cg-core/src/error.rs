//! Framework error type.
//!
//! Candidate rejection during growth is a control signal, not an error; the
//! variants here cover only caller mistakes surfaced before generation runs.
//! Sub-crates wrap `CoreError` or define their own enums with `From` impls.

use thiserror::Error;

/// The base error type for all `cg-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cg-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
