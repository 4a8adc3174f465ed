// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for window construction and decomposition.
//!
//! Empty results (no intersection, a fully covered complement) are not
//! errors; they are reported through `Option` and [`Pieces::Empty`](crate::Pieces::Empty).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("\"until\" ({until}) cannot be earlier than \"since\" ({since})")]
    InvertedBoundaries { since: String, until: String },

    #[error("cannot enclose an empty sequence of windows")]
    EmptyInput,

    #[error("Non-positive duration: {0}")]
    NonPositiveDuration(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, Error>;
