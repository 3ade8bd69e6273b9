use thiserror::Error;

/// Errors surfaced by the routing core.
///
/// `NotFound` is the only error the wire protocol exposes (`spec.md` §7); the
/// others are programming errors that abort the request rather than being
/// retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("router has not been initialised")]
    RouterNotInitialised,
}

pub type Result<T> = std::result::Result<T, Error>;
