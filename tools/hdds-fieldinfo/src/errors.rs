// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for field resolution and unit loading.

use thiserror::Error;

/// Why a field was rejected. The AST handed to the resolver broke its
/// precondition of a well-formed array or sequence member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("declared type is a {kind}, not an array or sequence")]
    NotArrayOrSequence { kind: &'static str },

    #[error("both field name and scoped type name are empty")]
    MissingName,

    #[error("element count of `{type_name}` does not fit in 32 bits")]
    ElementCountOverflow { type_name: String },

    #[error("anonymous member `{field}` is not declared inside a structure")]
    NoEnclosingStruct { field: String },

    #[error("marker type `{marker}` already tags {first}, cannot also tag {second}")]
    MarkerCollision {
        marker: String,
        first: String,
        second: String,
    },
}

/// Field resolution failure. Fatal for the compilation unit.
#[derive(Debug, Error)]
pub enum FieldInfoError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("header write failed: {0}")]
    Header(#[from] std::io::Error),
}

impl FieldInfoError {
    /// The rejection reason when the input itself was at fault.
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            Self::InvalidInput(reason) => Some(reason),
            Self::Header(_) => None,
        }
    }
}

/// Failure while loading an IDL unit description.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("identifier pattern: {0}")]
    Pattern(#[from] regex::Error),
}
