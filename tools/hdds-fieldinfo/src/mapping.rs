// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Language-mapping specific type expressions.
//!
//! The classic mapping passes arrays through their `_forany` helper and
//! sequences by plain reference. The modern mapping wraps both in
//! `IDL::DistinctType<T, Tag>` with a per-field empty tag struct so that two
//! differently shaped members over the same element type never mix.

use crate::backend::{Backend, MarkerOwner};
use crate::errors::FieldInfoError;
use crate::header::HeaderSink;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generated-API style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMapping {
    /// ABI-style mapping (`T_forany`, `TAO::String_Manager`).
    #[default]
    Classic,
    /// Value-type mapping (`std::array`, `std::vector`, `std::string`).
    Modern,
}

impl fmt::Display for LanguageMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => f.write_str("classic"),
            Self::Modern => f.write_str("modern"),
        }
    }
}

/// Array or sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Array,
    Sequence,
}

impl Shape {
    /// Argument-name placeholder spliced into generated bodies.
    pub const fn arg_name(self) -> &'static str {
        match self {
            Self::Array => "arr",
            Self::Sequence => "seq",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.write_str("array"),
            Self::Sequence => f.write_str("sequence"),
        }
    }
}

/// Argument name of the wrapped value in the modern mapping.
pub const WRAPPED_ARG: &str = "wrap";

/// Small C++ type-expression tree, rendered by `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Named(String),
    /// Classic array helper, `T_forany`.
    Forany(String),
    Const(Box<TypeExpr>),
    Reference(Box<TypeExpr>),
    Pointer(Box<TypeExpr>),
    /// `IDL::DistinctType<T, Marker>`.
    Distinct { target: Box<TypeExpr>, marker: String },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn constant(self) -> Self {
        Self::Const(Box::new(self))
    }

    #[must_use]
    pub fn reference(self) -> Self {
        Self::Reference(Box::new(self))
    }

    #[must_use]
    pub fn pointer(self) -> Self {
        Self::Pointer(Box::new(self))
    }

    #[must_use]
    pub fn distinct(self, marker: impl Into<String>) -> Self {
        Self::Distinct {
            target: Box::new(self),
            marker: marker.into(),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Forany(name) => write!(f, "{name}_forany"),
            Self::Const(inner) => write!(f, "const {inner}"),
            Self::Reference(inner) => write!(f, "{inner}&"),
            Self::Pointer(inner) => write!(f, "{inner}*"),
            Self::Distinct { target, marker } => {
                write!(f, "IDL::DistinctType<{target}, {marker}>")
            }
        }
    }
}

/// Mapping-specific part of a field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedTypes {
    pub reference: TypeExpr,
    pub const_reference: TypeExpr,
    /// Classic only.
    pub pointer: Option<TypeExpr>,
    /// Modern only.
    pub marker: Option<String>,
    pub unwrap: Option<String>,
    pub const_unwrap: Option<String>,
    pub arg: &'static str,
}

impl MappedTypes {
    pub fn classic(shape: Shape, scoped_type: &str) -> Self {
        let target = match shape {
            Shape::Array => TypeExpr::Forany(scoped_type.to_string()),
            Shape::Sequence => TypeExpr::named(scoped_type),
        };
        let reference = target.clone().reference();
        Self {
            const_reference: reference.clone().constant(),
            reference,
            pointer: Some(target.pointer()),
            marker: None,
            unwrap: None,
            const_unwrap: None,
            arg: shape.arg_name(),
        }
    }

    /// Build the modern types and declare the marker of `owner` in the
    /// backend header.
    pub fn modern<S: HeaderSink>(
        shape: Shape,
        scoped_type: &str,
        owner: &MarkerOwner,
        backend: &mut Backend<S>,
    ) -> Result<Self, FieldInfoError> {
        let marker = naming::marker_name(owner.path());
        backend.declare_marker(&marker, owner)?;

        let arg = shape.arg_name();
        let binding = format!("{scoped_type}& {arg} = {WRAPPED_ARG};\n  ACE_UNUSED_ARG({arg});\n");
        Ok(Self {
            reference: TypeExpr::named(scoped_type).distinct(marker.clone()),
            const_reference: TypeExpr::named(scoped_type)
                .constant()
                .distinct(marker.clone()),
            pointer: None,
            unwrap: Some(format!("  {binding}")),
            const_unwrap: Some(format!("  const {binding}")),
            marker: Some(marker),
            arg: WRAPPED_ARG,
        })
    }
}
