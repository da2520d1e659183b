// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array and sequence field descriptors for the HDDS IDL backend.
//!
//! Given a struct member typed as an anonymous array or sequence, or a named
//! array/sequence typedef, [`FieldInfo`] computes what the emission pass needs
//! to print marshaling, wrapper and accessor code:
//!
//! - shape, element classification and CDR wire size of one element
//! - element count (dimension product, sequence bound, or 0 when unbounded)
//! - synthetic names for anonymous types (`A::B::_x_seq`)
//! - reference/const-reference/pointer types for the active language mapping,
//!   plus the marker type the modern mapping declares in the generated header
//!
//! # Example
//!
//! ```
//! use hdds_fieldinfo::{
//!     Backend, BackendConfig, Field, FieldInfo, PrimitiveKind, StructDecl, TypeNode,
//! };
//!
//! let decl = StructDecl::new("A::B::S").with_fields(vec![Field::new(
//!     "x",
//!     TypeNode::sequence("", Some(10), TypeNode::primitive(PrimitiveKind::Long)),
//! )]);
//!
//! let mut backend = Backend::new(BackendConfig::classic(), String::new());
//! let info = FieldInfo::from_field(&decl.fields[0], &mut backend).unwrap();
//! assert_eq!(info.scoped_type_name(), "A::B::_x_seq");
//! assert_eq!(info.element_wire_size(), 4);
//! assert_eq!(info.element_count(), 10);
//! assert_eq!(info.reference_type(), "A::B::_x_seq&");
//! ```

pub mod ast;
pub mod backend;
pub mod classify;
pub mod config;
pub mod driver;
pub mod errors;
pub mod field_info;
pub mod header;
pub mod mapping;
pub mod naming;
pub mod report;

pub use ast::{
    ArrayType, Field, IdlUnit, PrimitiveKind, ScopedName, SequenceType, StructDecl, TypeNode,
    Typedef,
};
pub use backend::{Backend, MarkerOwner};
pub use classify::ElementClass;
pub use config::{BackendConfig, ConfigError};
pub use driver::{resolve_struct, resolve_unit, UnitInfo};
pub use errors::{FieldInfoError, InvalidInput, LoadError};
pub use field_info::{ElementLength, FieldInfo, FieldSummary};
pub use header::{HeaderSink, HeaderWriter};
pub use mapping::{LanguageMapping, Shape, TypeExpr};
