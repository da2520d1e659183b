// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array/sequence field descriptor.
//!
//! A [`FieldInfo`] is built once per array or sequence the emission pass
//! visits. Construction classifies and names the field, then builds the
//! type strings of the active language mapping. It either fully succeeds or
//! fails with [`InvalidInput`]; there is no partial descriptor.

use crate::ast::{Field, ScopedName, TypeNode};
use crate::backend::{Backend, MarkerOwner};
use crate::classify::ElementClass;
use crate::errors::{FieldInfoError, InvalidInput};
use crate::header::HeaderSink;
use crate::mapping::{LanguageMapping, MappedTypes, Shape, TypeExpr};
use crate::naming;
use serde::Serialize;

/// Where the descriptor's name comes from.
enum NameSource<'n> {
    /// Local name of a member with an anonymous array/sequence type.
    Field(&'n str),
    /// Scoped name of a named array/sequence type.
    Scoped(&'n ScopedName),
}

/// Element identity and element count.
///
/// Two fields with equal keys can share one generated helper.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementLength {
    pub element: String,
    pub count: u32,
}

#[derive(Debug, Clone)]
pub struct FieldInfo<'a> {
    declared_type: &'a TypeNode,
    shape: Shape,
    element_type: &'a TypeNode,
    actual_element_type: &'a TypeNode,
    element_class: ElementClass,
    element_wire_size: u32,
    element_type_name: String,
    element_count: u32,
    name: String,
    canonical_name: String,
    scoped_type_name: String,
    enclosing_scope: Option<String>,
    mapping: LanguageMapping,
    length: String,
    mapped: MappedTypes,
}

impl<'a> FieldInfo<'a> {
    /// Descriptor for a member whose type is an anonymous array or sequence.
    pub fn from_field<S: HeaderSink>(
        field: &'a Field,
        backend: &mut Backend<S>,
    ) -> Result<Self, FieldInfoError> {
        Self::init(&field.field_type, NameSource::Field(&field.name), backend)
    }

    /// Descriptor for a named array or sequence type.
    pub fn from_scoped_name<S: HeaderSink>(
        scoped_name: &ScopedName,
        base: &'a TypeNode,
        backend: &mut Backend<S>,
    ) -> Result<Self, FieldInfoError> {
        Self::init(base, NameSource::Scoped(scoped_name), backend)
    }

    fn init<S: HeaderSink>(
        declared_type: &'a TypeNode,
        source: NameSource<'_>,
        backend: &mut Backend<S>,
    ) -> Result<Self, FieldInfoError> {
        let (shape, element_type, member) = match declared_type {
            TypeNode::Array(array) => (Shape::Array, array.base.as_ref(), &array.name),
            TypeNode::Sequence(sequence) => {
                (Shape::Sequence, sequence.base.as_ref(), &sequence.name)
            }
            other => {
                return Err(InvalidInput::NotArrayOrSequence {
                    kind: other.kind_name(),
                }
                .into())
            }
        };
        let actual_element_type = element_type.resolve_actual();
        let element_class = ElementClass::of(actual_element_type);
        let mapping = backend.language_mapping();

        let (name, canonical_name, scoped_type_name, enclosing_scope, owner) = match source {
            NameSource::Field(local) if !local.is_empty() => {
                // the member name must include its structure
                if member.parent().is_none() {
                    return Err(InvalidInput::NoEnclosingStruct {
                        field: local.to_string(),
                    }
                    .into());
                }
                let canonical = naming::canonical_name(local, shape == Shape::Sequence);
                let scope = naming::enclosing_scope(member);
                let scoped = naming::qualify(&scope, &canonical);
                let owner = MarkerOwner::Field(member.clone());
                (local.to_string(), canonical, scoped, Some(scope), owner)
            }
            NameSource::Scoped(scoped) if !scoped.is_empty() => {
                let rendered = scoped.to_string();
                (
                    String::new(),
                    rendered.clone(),
                    rendered,
                    None,
                    MarkerOwner::Type(scoped.clone()),
                )
            }
            _ => return Err(InvalidInput::MissingName.into()),
        };

        let element_count = match declared_type {
            TypeNode::Array(array) => array
                .dims
                .iter()
                .try_fold(1u32, |count, dim| count.checked_mul(*dim))
                .ok_or_else(|| InvalidInput::ElementCountOverflow {
                    type_name: scoped_type_name.clone(),
                })?,
            TypeNode::Sequence(sequence) => sequence.max_size.unwrap_or(0),
            _ => 0,
        };
        let length = match shape {
            Shape::Array => element_count.to_string(),
            Shape::Sequence => "length".to_string(),
        };

        let mapped = match mapping {
            LanguageMapping::Classic => MappedTypes::classic(shape, &scoped_type_name),
            LanguageMapping::Modern => {
                MappedTypes::modern(shape, &scoped_type_name, &owner, backend)?
            }
        };

        tracing::debug!(
            field = %scoped_type_name,
            %shape,
            element = %element_class,
            count = element_count,
            %mapping,
            "resolved field"
        );

        Ok(Self {
            declared_type,
            shape,
            element_type,
            actual_element_type,
            element_class,
            element_wire_size: element_class.wire_size(),
            element_type_name: element_class.cxx_type_name(mapping, element_type),
            element_count,
            name,
            canonical_name,
            scoped_type_name,
            enclosing_scope,
            mapping,
            length,
            mapped,
        })
    }

    pub fn declared_type(&self) -> &'a TypeNode {
        self.declared_type
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_array(&self) -> bool {
        self.shape == Shape::Array
    }

    pub fn is_sequence(&self) -> bool {
        self.shape == Shape::Sequence
    }

    /// Element as declared, aliases intact.
    pub fn element_type(&self) -> &'a TypeNode {
        self.element_type
    }

    /// Element with every alias stripped.
    pub fn actual_element_type(&self) -> &'a TypeNode {
        self.actual_element_type
    }

    pub fn element_class(&self) -> ElementClass {
        self.element_class
    }

    /// Wire-size contribution of one element; 0 when the element sizes itself.
    pub fn element_wire_size(&self) -> u32 {
        self.element_wire_size
    }

    /// C++ spelling of one element.
    pub fn element_type_name(&self) -> &str {
        &self.element_type_name
    }

    /// Product of the dimensions, the sequence bound, or 0 if unbounded.
    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self.declared_type, TypeNode::Sequence(seq) if seq.is_unbounded())
    }

    /// Member local name, empty for named types.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn scoped_type_name(&self) -> &str {
        &self.scoped_type_name
    }

    /// Scope holding the enclosing structure; `None` for named types.
    pub fn enclosing_scope(&self) -> Option<&str> {
        self.enclosing_scope.as_deref()
    }

    pub fn mapping(&self) -> LanguageMapping {
        self.mapping
    }

    /// Length label spliced into generated loops.
    pub fn length(&self) -> &str {
        &self.length
    }

    /// Argument-name placeholder spliced into generated bodies.
    pub fn arg(&self) -> &'static str {
        self.mapped.arg
    }

    pub fn reference_type(&self) -> String {
        self.mapped.reference.to_string()
    }

    pub fn const_reference_type(&self) -> String {
        self.mapped.const_reference.to_string()
    }

    pub fn pointer_type(&self) -> Option<String> {
        self.mapped.pointer.as_ref().map(TypeExpr::to_string)
    }

    pub fn reference_expr(&self) -> &TypeExpr {
        &self.mapped.reference
    }

    pub fn const_reference_expr(&self) -> &TypeExpr {
        &self.mapped.const_reference
    }

    pub fn marker_type_name(&self) -> Option<&str> {
        self.mapped.marker.as_deref()
    }

    pub fn unwrap_snippet(&self) -> Option<&str> {
        self.mapped.unwrap.as_deref()
    }

    pub fn const_unwrap_snippet(&self) -> Option<&str> {
        self.mapped.const_unwrap.as_deref()
    }

    pub fn element_length(&self) -> ElementLength {
        ElementLength {
            element: naming::type_name(self.element_type),
            count: self.element_count,
        }
    }

    /// Owned, serializable view for reports.
    pub fn summary(&self) -> FieldSummary {
        FieldSummary {
            name: self.name.clone(),
            canonical_name: self.canonical_name.clone(),
            scoped_type_name: self.scoped_type_name.clone(),
            enclosing_scope: self.enclosing_scope.clone(),
            shape: self.shape,
            element_class: self.element_class.to_string(),
            element_type_name: self.element_type_name.clone(),
            element_wire_size: self.element_wire_size,
            element_count: self.element_count,
            unbounded: self.is_unbounded(),
            mapping: self.mapping,
            length: self.length.clone(),
            arg: self.arg().to_string(),
            reference_type: self.reference_type(),
            const_reference_type: self.const_reference_type(),
            pointer_type: self.pointer_type(),
            marker_type_name: self.mapped.marker.clone(),
        }
    }
}

/// Serializable snapshot of a [`FieldInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub canonical_name: String,
    pub scoped_type_name: String,
    pub enclosing_scope: Option<String>,
    pub shape: Shape,
    pub element_class: String,
    pub element_type_name: String,
    pub element_wire_size: u32,
    pub element_count: u32,
    pub unbounded: bool,
    pub mapping: LanguageMapping,
    pub length: String,
    pub arg: String,
    pub reference_type: String,
    pub const_reference_type: String,
    pub pointer_type: Option<String>,
    pub marker_type_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PrimitiveKind;
    use crate::config::BackendConfig;

    fn classic() -> Backend {
        Backend::new(BackendConfig::classic(), String::new())
    }

    #[test]
    fn test_length_and_arg_labels() {
        let mut backend = classic();
        let arr = Field::new(
            "grid",
            TypeNode::array("M::S::grid", vec![2, 3], TypeNode::primitive(PrimitiveKind::Long)),
        );
        let info = FieldInfo::from_field(&arr, &mut backend).expect("array");
        assert_eq!(info.length(), "6");
        assert_eq!(info.arg(), "arr");

        let seq = Field::new(
            "ids",
            TypeNode::sequence("M::S::ids", None, TypeNode::primitive(PrimitiveKind::Long)),
        );
        let info = FieldInfo::from_field(&seq, &mut backend).expect("sequence");
        assert_eq!(info.length(), "length");
        assert_eq!(info.arg(), "seq");
    }

    #[test]
    fn test_element_count_overflow_is_rejected() {
        let mut backend = classic();
        let field = Field::new(
            "huge",
            TypeNode::array(
                "M::S::huge",
                vec![u32::MAX, 2],
                TypeNode::primitive(PrimitiveKind::Octet),
            ),
        );
        let err = FieldInfo::from_field(&field, &mut backend).unwrap_err();
        assert!(matches!(
            err.invalid_input(),
            Some(InvalidInput::ElementCountOverflow { .. })
        ));
    }

    #[test]
    fn test_anonymous_member_outside_struct_is_rejected() {
        let mut backend = Backend::new(BackendConfig::modern(), String::new());
        let field = Field::new(
            "raw",
            TypeNode::sequence("", Some(8), TypeNode::primitive(PrimitiveKind::Octet)),
        );
        let err = FieldInfo::from_field(&field, &mut backend).unwrap_err();
        assert_eq!(
            err.invalid_input(),
            Some(&InvalidInput::NoEnclosingStruct {
                field: "raw".to_string()
            })
        );
        assert!(backend.header().is_empty());
    }

    #[test]
    fn test_top_level_struct_member_is_scoped_by_struct() {
        let mut backend = Backend::new(BackendConfig::modern(), String::new());
        let field = Field::new(
            "raw",
            TypeNode::sequence("Frame::raw", Some(8), TypeNode::primitive(PrimitiveKind::Octet)),
        );
        let info = FieldInfo::from_field(&field, &mut backend).expect("sequence");
        assert_eq!(info.scoped_type_name(), "Frame::_raw_seq");
        assert_eq!(info.enclosing_scope(), Some("Frame"));
        assert_eq!(info.marker_type_name(), Some("Frame_raw_tag"));
    }

    #[test]
    fn test_element_length_key() {
        let mut backend = classic();
        let a = Field::new(
            "a",
            TypeNode::array("M::S::a", vec![4], TypeNode::primitive(PrimitiveKind::Float)),
        );
        let b = Field::new(
            "b",
            TypeNode::array("M::T::b", vec![2, 2], TypeNode::primitive(PrimitiveKind::Float)),
        );
        let ka = FieldInfo::from_field(&a, &mut backend).expect("a").element_length();
        let kb = FieldInfo::from_field(&b, &mut backend).expect("b").element_length();
        assert_eq!(ka, kb);
        assert_eq!(ka.element, "float");
        assert_eq!(ka.count, 4);
    }
}
