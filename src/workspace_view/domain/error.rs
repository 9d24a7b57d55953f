//! Error types for workspace view validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating workspace view values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewDomainError {
    /// The view name is empty after trimming.
    #[error("view name must not be empty")]
    EmptyViewName,

    /// The view name exceeds the 255-character storage limit.
    #[error("view name exceeds 255 character limit ({0} characters)")]
    ViewNameTooLong(usize),

    /// The access level is not one of the defined values.
    #[error("invalid view access value {0} (expected 0 for private or 1 for public)")]
    InvalidAccess(i16),

    /// The view query is JSON `null`.
    #[error("view query must not be null")]
    NullQuery,
}

/// Error returned while parsing a view ordering keyword.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown view ordering: {0}")]
pub struct ParseViewOrderingError(pub String);
