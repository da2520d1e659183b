// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element classification and the CDR wire-size table.
//!
//! The wire size is the element's contribution to buffer-size and alignment
//! bookkeeping in generated marshaling code. It is not the in-memory size:
//! strings contribute their 4-byte length prefix, and aggregates contribute
//! nothing here because their own generated code sizes them.

use crate::ast::{PrimitiveKind, TypeNode};
use crate::mapping::LanguageMapping;
use crate::naming::type_name;
use std::fmt;

/// Classification of an array/sequence element after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Enum,
    String { wide: bool },
    Primitive(PrimitiveKind),
    /// Structs, unions, nested arrays and sequences.
    Aggregate,
}

impl ElementClass {
    /// Classify a type node, looking through any aliases.
    pub fn of(actual: &TypeNode) -> Self {
        match actual.resolve_actual() {
            TypeNode::Enum { .. } => Self::Enum,
            TypeNode::String { wide, .. } => Self::String { wide: *wide },
            TypeNode::Primitive { primitive } => Self::Primitive(*primitive),
            _ => Self::Aggregate,
        }
    }

    pub const fn wire_size(self) -> u32 {
        match self {
            Self::Enum => 4,
            // length prefix only
            Self::String { .. } => 4,
            Self::Primitive(kind) => kind.wire_size(),
            Self::Aggregate => 0,
        }
    }

    /// C++ spelling of one element in generated code.
    ///
    /// `declared` is the element as written (aliases intact), used to name
    /// aggregates.
    pub fn cxx_type_name(self, mapping: LanguageMapping, declared: &TypeNode) -> String {
        match self {
            Self::Enum => "ACE_CDR::ULong".to_string(),
            Self::String { wide } => string_type(mapping, wide).to_string(),
            Self::Primitive(kind) => kind.cdr_type().to_string(),
            Self::Aggregate => type_name(declared),
        }
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum => f.write_str("enum"),
            Self::String { wide: false } => f.write_str("string"),
            Self::String { wide: true } => f.write_str("wstring"),
            Self::Primitive(kind) => write!(f, "primitive({kind})"),
            Self::Aggregate => f.write_str("aggregate"),
        }
    }
}

impl PrimitiveKind {
    // @audit-ok: Simple pattern matching (cyclo 13, cogni 1) - CDR size table
    pub const fn wire_size(self) -> u32 {
        match self {
            Self::Long | Self::ULong | Self::Float => 4,
            Self::LongLong | Self::ULongLong | Self::Double => 8,
            Self::Short | Self::UShort => 2,
            Self::LongDouble => 16,
            Self::Char | Self::Boolean | Self::Octet => 1,
            // the length encoding of a wchar is 1 byte
            Self::WChar => 1,
        }
    }

    // @audit-ok: Simple pattern matching (cyclo 13, cogni 1) - type to string literal mapping
    pub const fn cdr_type(self) -> &'static str {
        match self {
            Self::Long => "ACE_CDR::Long",
            Self::ULong => "ACE_CDR::ULong",
            Self::LongLong => "ACE_CDR::LongLong",
            Self::ULongLong => "ACE_CDR::ULongLong",
            Self::Short => "ACE_CDR::Short",
            Self::UShort => "ACE_CDR::UShort",
            Self::Float => "ACE_CDR::Float",
            Self::Double => "ACE_CDR::Double",
            Self::LongDouble => "ACE_CDR::LongDouble",
            Self::Char => "ACE_CDR::Char",
            Self::WChar => "ACE_CDR::WChar",
            Self::Boolean => "ACE_CDR::Boolean",
            Self::Octet => "ACE_CDR::Octet",
        }
    }
}

/// String element type for the given mapping.
pub const fn string_type(mapping: LanguageMapping, wide: bool) -> &'static str {
    match (mapping, wide) {
        (LanguageMapping::Modern, false) => "std::string",
        (LanguageMapping::Modern, true) => "std::wstring",
        (LanguageMapping::Classic, false) => "TAO::String_Manager",
        (LanguageMapping::Classic, true) => "TAO::WString_Manager",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_wire_sizes() {
        let expected = [
            (PrimitiveKind::Long, 4),
            (PrimitiveKind::ULong, 4),
            (PrimitiveKind::Float, 4),
            (PrimitiveKind::LongLong, 8),
            (PrimitiveKind::ULongLong, 8),
            (PrimitiveKind::Double, 8),
            (PrimitiveKind::Short, 2),
            (PrimitiveKind::UShort, 2),
            (PrimitiveKind::LongDouble, 16),
            (PrimitiveKind::Char, 1),
            (PrimitiveKind::Boolean, 1),
            (PrimitiveKind::Octet, 1),
            (PrimitiveKind::WChar, 1),
        ];
        assert_eq!(expected.len(), PrimitiveKind::ALL.len());
        for (kind, size) in expected {
            assert_eq!(ElementClass::Primitive(kind).wire_size(), size, "{kind}");
        }
    }

    #[test]
    fn test_wchar_wire_size_is_length_encoding_quirk() {
        // Not the in-memory width of a wide char; kept as the generated code expects.
        assert_eq!(PrimitiveKind::WChar.wire_size(), 1);
        assert_eq!(PrimitiveKind::WChar.cdr_type(), "ACE_CDR::WChar");
    }

    #[test]
    fn test_classify_through_alias() {
        let node = TypeNode::alias("M::Color", TypeNode::enumeration("M::ColorKind"));
        assert_eq!(ElementClass::of(&node), ElementClass::Enum);
        assert_eq!(ElementClass::of(&node).wire_size(), 4);
    }

    #[test]
    fn test_classify_resolved_and_aliased_nodes_agree() {
        let actual = TypeNode::primitive(PrimitiveKind::Short);
        let aliased = TypeNode::alias("M::Small", actual.clone());
        assert_eq!(ElementClass::of(&aliased), ElementClass::of(&actual));
        assert_eq!(ElementClass::of(&aliased), ElementClass::Primitive(PrimitiveKind::Short));
    }

    #[test]
    fn test_strings_use_length_prefix_size() {
        assert_eq!(ElementClass::of(&TypeNode::string()).wire_size(), 4);
        assert_eq!(ElementClass::of(&TypeNode::wstring()).wire_size(), 4);
    }

    #[test]
    fn test_aggregate_size_is_deferred() {
        let node = TypeNode::structure("M::Point");
        let class = ElementClass::of(&node);
        assert_eq!(class, ElementClass::Aggregate);
        assert_eq!(class.wire_size(), 0);
        assert_eq!(class.cxx_type_name(LanguageMapping::Classic, &node), "M::Point");
    }

    #[test]
    fn test_string_spelling_per_mapping() {
        let wide = ElementClass::String { wide: true };
        let narrow = ElementClass::String { wide: false };
        let node = TypeNode::string();
        assert_eq!(
            narrow.cxx_type_name(LanguageMapping::Classic, &node),
            "TAO::String_Manager"
        );
        assert_eq!(
            wide.cxx_type_name(LanguageMapping::Classic, &node),
            "TAO::WString_Manager"
        );
        assert_eq!(narrow.cxx_type_name(LanguageMapping::Modern, &node), "std::string");
        assert_eq!(wide.cxx_type_name(LanguageMapping::Modern, &node), "std::wstring");
    }
}
