// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Haxe whitespace and brace style inference.
//!
//! See [`style::StyleService`] for the entry point.

pub mod error;
pub mod style;

pub use error::StyleError;
