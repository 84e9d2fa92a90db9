//! Error types for the todo item codecs.
//!
//! # Design
//! Only shape-level problems are errors. Field-level problems (an unknown
//! priority name, an unparseable timestamp) fall back to defaults during
//! reconstruction and never surface here.

use thiserror::Error;

/// Errors returned by the encoders and decoders.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input handed to a decoder was not a string.
    #[error("input is not text")]
    NotTextInput,

    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    EncodingInvalid(#[from] std::str::Utf8Error),

    /// JSON parsing failed, or the parsed value is not `{id: {field: string}}`.
    #[error("malformed structured text: {0}")]
    MalformedStructuredText(String),

    /// The flat line has fewer fields than the format requires.
    #[error("expected at least {expected} comma-separated fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// The record for `id` lacks a field that has no default.
    #[error("record '{id}' is missing required field '{field}'")]
    MissingRequiredField { id: String, field: &'static str },

    /// The JSON serializer rejected the record.
    #[error("serialization failed: {0}")]
    SerializationFailure(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
