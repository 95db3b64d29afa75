use std::fmt::Display;

use anyhow::Error;
use thiserror::Error;

use crate::error::WrapError;

/// A general error, consisting of only a message.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct GeneralError {
    message: String,
}

impl GeneralError {
    /// Constructs a new general error.
    pub fn new<M>(message: M) -> Self
    where
        M: Display,
    {
        Self {
            message: message.to_string(),
        }
    }
}

/// A not found error.
#[derive(Error, Debug)]
#[error("{target} not found")]
pub struct NotFoundError {
    target: String,
}

impl NotFoundError {
    /// Constructs a new not found error.
    pub fn new<M>(target: M) -> Self
    where
        M: Display,
    {
        Self {
            target: target.to_string(),
        }
    }
}

/// The requested key names neither a mod nor a format known to the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("mod {key} does not exist")]
pub struct UnknownModError {
    /// The key as it was requested.
    pub key: String,
}

/// A team passed to battle creation is not a list of sets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("team {index} is not a list")]
pub struct InvalidTeamError {
    /// Zero-based position of the team in the request.
    pub index: usize,
}

/// An object graph contains a reference that is its own ancestor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cyclic object structure at depth {depth}")]
pub struct CyclicStructureError {
    pub depth: usize,
}

/// Helper for an [`struct@Error`] wrapping a [`GeneralError`].
#[track_caller]
pub fn general_error<M>(message: M) -> Error
where
    M: Display,
{
    GeneralError::new(message).wrap_error()
}

/// Helper for an [`struct@Error`] wrapping a [`NotFoundError`].
#[track_caller]
pub fn not_found_error<M>(target: M) -> Error
where
    M: Display,
{
    NotFoundError::new(target).wrap_error()
}

/// Helper for an [`struct@Error`] wrapping an [`UnknownModError`].
#[track_caller]
pub fn unknown_mod_error<M>(key: M) -> Error
where
    M: Display,
{
    UnknownModError {
        key: key.to_string(),
    }
    .wrap_error()
}

/// Helper for an [`struct@Error`] wrapping an [`InvalidTeamError`].
#[track_caller]
pub fn invalid_team_error(index: usize) -> Error {
    InvalidTeamError { index }.wrap_error()
}
