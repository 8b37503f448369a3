// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading settings or persisting preferences.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings must be a JSON object")]
    NotAnObject,

    #[error("cannot write `{name}` to {}: {source}", .dir.display())]
    Cache {
        name: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences document: {0}")]
    MalformedDocument(String),

    #[error("unknown style slot `{0}`")]
    UnknownSlot(String),
}
