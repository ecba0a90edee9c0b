//! Numbered errors surfaced by command handlers
//!
//! Every failure point inside a handler has its own number, so a message such as
//! `appendersGet002 400 Bad Request {...}` identifies exactly which check failed.

use std::error::Error as StdError;
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error returned by a command handler
#[derive(Error, Debug)]
#[error("{function}{errno:03} {message}")]
pub struct NgsiError {
    /// Name of the operation that failed
    pub function: &'static str,
    /// Position of the failing check within the operation, starting at 1
    pub errno: u32,
    /// Human-readable message
    pub message: String,
    #[source]
    source: Option<BoxError>,
}

impl NgsiError {
    /// Create an error without an underlying cause
    pub fn new<S: Into<String>>(function: &'static str, errno: u32, message: S) -> Self {
        Self {
            function,
            errno,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error; its text becomes the message
    pub fn wrap<E>(function: &'static str, errno: u32, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            function,
            errno,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Wrap an error raised by a nested operation, keeping its bare message
    pub fn nested(function: &'static str, errno: u32, inner: NgsiError) -> Self {
        Self {
            function,
            errno,
            message: inner.message.clone(),
            source: Some(Box::new(inner)),
        }
    }
}

impl From<std::io::Error> for NgsiError {
    fn from(err: std::io::Error) -> Self {
        NgsiError::wrap("write", 1, err)
    }
}
