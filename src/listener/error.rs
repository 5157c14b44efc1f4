// src/listener/error.rs
use crate::address::AddressError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error(transparent)]
    Address(#[from] AddressError),

    /// The bind provider failed; the error is passed through as-is.
    #[error(transparent)]
    Underlying(#[from] io::Error),

    #[error("Failed to bind '{host}' within [{min}:{max}]")]
    RangeExhausted { host: String, min: u16, max: u16 },
}
