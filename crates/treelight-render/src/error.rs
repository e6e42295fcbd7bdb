//! Error types for treelight-render operations.

use thiserror::Error;

/// The error type for splicing and rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A capture's offsets do not describe a valid half-open range of the source.
    #[error("Invalid capture span {start}..{end} for source of {len} bytes: {reason}")]
    InvalidSpan {
        /// Start offset reported for the capture.
        start: usize,
        /// End offset reported for the capture.
        end: usize,
        /// Length of the source text in bytes.
        len: usize,
        /// Which constraint the span violates.
        reason: &'static str,
    },
}

/// A specialized Result type for treelight-render operations.
pub type Result<T> = std::result::Result<T, Error>;
