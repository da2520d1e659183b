// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IDL front-end boundary.
//!
//! The parser hands the backend an already validated type graph. These types
//! are that graph: scoped names, type nodes (a tagged union instead of
//! runtime downcasts), struct members, and the unit that groups them.
//! Array dimensions and sequence bounds arrive as evaluated literals.

use crate::errors::LoadError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Scope separator used by IDL scoped names.
pub const SCOPE_SEPARATOR: &str = "::";

/// IDL identifiers, also accepted as C preprocessor macro names.
pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Compiled [`IDENTIFIER_PATTERN`], built once per process.
pub(crate) fn identifier_regex() -> Result<&'static Regex, regex::Error> {
    static IDENTIFIER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| Regex::new(IDENTIFIER_PATTERN))
        .as_ref()
        .map_err(Clone::clone)
}

/// Fully scoped IDL name (`Module::Struct::member`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ScopedName(Vec<String>);

impl ScopedName {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(components.into_iter().map(Into::into).collect())
    }

    /// Parse `A::B::C`. A leading `::` (global scope) is ignored.
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(SCOPE_SEPARATOR)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last component, or `""` for an empty name.
    pub fn local_name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// Name of the enclosing scope, `None` at the top level.
    pub fn parent(&self) -> Option<ScopedName> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self(rest.to_vec())),
            _ => None,
        }
    }

    #[must_use]
    pub fn child(&self, local: impl Into<String>) -> ScopedName {
        let mut components = self.0.clone();
        components.push(local.into());
        Self(components)
    }

    /// Join the components with an arbitrary separator.
    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined(SCOPE_SEPARATOR))
    }
}

impl From<String> for ScopedName {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ScopedName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ScopedName> for String {
    fn from(value: ScopedName) -> Self {
        value.to_string()
    }
}

/// IDL predefined types that have a fixed CDR encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "unsigned long")]
    ULong,
    #[serde(rename = "long long")]
    LongLong,
    #[serde(rename = "unsigned long long")]
    ULongLong,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "unsigned short")]
    UShort,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "long double")]
    LongDouble,
    #[serde(rename = "char")]
    Char,
    #[serde(rename = "wchar")]
    WChar,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "octet")]
    Octet,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 13] = [
        Self::Long,
        Self::ULong,
        Self::LongLong,
        Self::ULongLong,
        Self::Short,
        Self::UShort,
        Self::Float,
        Self::Double,
        Self::LongDouble,
        Self::Char,
        Self::WChar,
        Self::Boolean,
        Self::Octet,
    ];

    // @audit-ok: Simple pattern matching (cyclo 13, cogni 1) - keyword table
    pub const fn idl_name(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::ULong => "unsigned long",
            Self::LongLong => "long long",
            Self::ULongLong => "unsigned long long",
            Self::Short => "short",
            Self::UShort => "unsigned short",
            Self::Float => "float",
            Self::Double => "double",
            Self::LongDouble => "long double",
            Self::Char => "char",
            Self::WChar => "wchar",
            Self::Boolean => "boolean",
            Self::Octet => "octet",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.idl_name())
    }
}

/// Fixed-size, possibly multi-dimensional array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    /// For anonymous arrays, the scoped name of the declaring member.
    #[serde(default)]
    pub name: ScopedName,
    pub dims: Vec<u32>,
    pub base: Box<TypeNode>,
}

/// Sequence, unbounded when `max_size` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceType {
    /// For anonymous sequences, the scoped name of the declaring member.
    #[serde(default)]
    pub name: ScopedName,
    #[serde(default)]
    pub max_size: Option<u32>,
    pub base: Box<TypeNode>,
}

impl SequenceType {
    pub fn is_unbounded(&self) -> bool {
        self.max_size.is_none()
    }
}

/// Resolved AST type node.
///
/// A member typed directly as `Array` or `Sequence` is anonymous; a named
/// array or sequence reaches a member through an `Alias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    Primitive {
        primitive: PrimitiveKind,
    },
    String {
        #[serde(default)]
        wide: bool,
        #[serde(default)]
        bound: Option<u32>,
    },
    Enum {
        name: ScopedName,
    },
    Alias {
        name: ScopedName,
        target: Box<TypeNode>,
    },
    Struct {
        name: ScopedName,
    },
    Union {
        name: ScopedName,
    },
    Array(ArrayType),
    Sequence(SequenceType),
}

impl TypeNode {
    pub fn primitive(primitive: PrimitiveKind) -> Self {
        Self::Primitive { primitive }
    }

    pub fn string() -> Self {
        Self::String {
            wide: false,
            bound: None,
        }
    }

    pub fn wstring() -> Self {
        Self::String {
            wide: true,
            bound: None,
        }
    }

    pub fn enumeration(name: impl Into<ScopedName>) -> Self {
        Self::Enum { name: name.into() }
    }

    pub fn structure(name: impl Into<ScopedName>) -> Self {
        Self::Struct { name: name.into() }
    }

    pub fn alias(name: impl Into<ScopedName>, target: TypeNode) -> Self {
        Self::Alias {
            name: name.into(),
            target: Box::new(target),
        }
    }

    pub fn array(name: impl Into<ScopedName>, dims: Vec<u32>, base: TypeNode) -> Self {
        Self::Array(ArrayType {
            name: name.into(),
            dims,
            base: Box::new(base),
        })
    }

    pub fn sequence(name: impl Into<ScopedName>, max_size: Option<u32>, base: TypeNode) -> Self {
        Self::Sequence(SequenceType {
            name: name.into(),
            max_size,
            base: Box::new(base),
        })
    }

    /// Node kind label used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive { .. } => "primitive",
            Self::String { .. } => "string",
            Self::Enum { .. } => "enum",
            Self::Alias { .. } => "alias",
            Self::Struct { .. } => "struct",
            Self::Union { .. } => "union",
            Self::Array(_) => "array",
            Self::Sequence(_) => "sequence",
        }
    }

    pub fn is_anonymous_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_anonymous_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn is_anonymous_type(&self) -> bool {
        self.is_anonymous_array() || self.is_anonymous_sequence()
    }

    /// Strip every alias layer.
    pub fn resolve_actual(&self) -> &TypeNode {
        let mut node = self;
        while let Self::Alias { target, .. } = node {
            node = target.as_ref();
        }
        node
    }

    /// Name every unnamed anonymous array/sequence below this node after `owner`.
    fn name_anonymous(&mut self, owner: &ScopedName) {
        match self {
            Self::Array(array) => {
                if array.name.is_empty() {
                    array.name = owner.clone();
                }
                let owner = array.name.clone();
                array.base.name_anonymous(&owner);
            }
            Self::Sequence(sequence) => {
                if sequence.name.is_empty() {
                    sequence.name = owner.clone();
                }
                let owner = sequence.name.clone();
                sequence.base.name_anonymous(&owner);
            }
            Self::Alias { target, .. } => target.name_anonymous(owner),
            _ => {}
        }
    }
}

/// Structure member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeNode,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: TypeNode) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Structure declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: ScopedName,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl StructDecl {
    pub fn new(name: impl Into<ScopedName>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Attach members. Anonymous member types are named after their declarator.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self.name_anonymous_members();
        self
    }

    fn name_anonymous_members(&mut self) {
        for field in &mut self.fields {
            let owner = self.name.child(field.name.clone());
            field.field_type.name_anonymous(&owner);
        }
    }
}

/// Named array or sequence (`typedef long Matrix[3][3];`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typedef {
    pub name: ScopedName,
    pub base: TypeNode,
}

/// Everything the backend visits for one IDL file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlUnit {
    #[serde(default)]
    pub structs: Vec<StructDecl>,
    #[serde(default)]
    pub typedefs: Vec<Typedef>,
}

impl IdlUnit {
    pub fn from_yaml_str(text: &str) -> Result<Self, LoadError> {
        let unit: Self = serde_yaml::from_str(text)?;
        unit.prepared()
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let unit: Self = serde_json::from_str(text)?;
        unit.prepared()
    }

    /// Load a unit; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    fn prepared(mut self) -> Result<Self, LoadError> {
        self.validate()?;
        for decl in &mut self.structs {
            decl.name_anonymous_members();
        }
        for typedef in &mut self.typedefs {
            let owner = typedef.name.clone();
            typedef.base.name_anonymous(&owner);
        }
        Ok(self)
    }

    /// Check that every declared name is an IDL identifier.
    pub fn validate(&self) -> Result<(), LoadError> {
        let identifier = identifier_regex()?;
        let check_scoped = |name: &ScopedName| -> Result<(), LoadError> {
            if name.is_empty() {
                return Err(LoadError::InvalidIdentifier(String::new()));
            }
            match name.components().iter().find(|c| !identifier.is_match(c)) {
                Some(bad) => Err(LoadError::InvalidIdentifier(bad.clone())),
                None => Ok(()),
            }
        };

        for decl in &self.structs {
            check_scoped(&decl.name)?;
            for field in &decl.fields {
                if !identifier.is_match(&field.name) {
                    return Err(LoadError::InvalidIdentifier(field.name.clone()));
                }
            }
        }
        for typedef in &self.typedefs {
            check_scoped(&typedef.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_name_parse_and_display() {
        let name = ScopedName::parse("::A::B::S");
        assert_eq!(name.components(), ["A", "B", "S"]);
        assert_eq!(name.to_string(), "A::B::S");
        assert_eq!(name.local_name(), "S");
        assert_eq!(name.parent(), Some(ScopedName::parse("A::B")));
        assert_eq!(ScopedName::parse("S").parent(), None);
        assert_eq!(name.joined("_"), "A_B_S");
    }

    #[test]
    fn test_resolve_actual_strips_alias_chain() {
        let node = TypeNode::alias(
            "M::Outer",
            TypeNode::alias("M::Inner", TypeNode::primitive(PrimitiveKind::Short)),
        );
        assert_eq!(
            node.resolve_actual(),
            &TypeNode::primitive(PrimitiveKind::Short)
        );
    }

    #[test]
    fn test_anonymous_predicates() {
        let arr = TypeNode::array("", vec![2], TypeNode::string());
        let seq = TypeNode::sequence("", None, TypeNode::string());
        let named = TypeNode::alias("M::Arr", arr.clone());
        assert!(arr.is_anonymous_array());
        assert!(!arr.is_anonymous_sequence());
        assert!(seq.is_anonymous_sequence());
        assert!(seq.is_anonymous_type());
        assert!(!named.is_anonymous_type());
    }

    #[test]
    fn test_with_fields_names_anonymous_members() {
        let decl = StructDecl::new("A::B::S").with_fields(vec![Field::new(
            "grid",
            TypeNode::sequence(
                "",
                None,
                TypeNode::array("", vec![4], TypeNode::primitive(PrimitiveKind::Octet)),
            ),
        )]);
        let TypeNode::Sequence(seq) = &decl.fields[0].field_type else {
            panic!("expected sequence");
        };
        assert_eq!(seq.name.to_string(), "A::B::S::grid");
        let TypeNode::Array(inner) = seq.base.as_ref() else {
            panic!("expected nested array");
        };
        assert_eq!(inner.name.to_string(), "A::B::S::grid");
    }

    #[test]
    fn test_unit_from_yaml() {
        let yaml = r#"
structs:
  - name: Sensors::Reading
    fields:
      - name: samples
        type:
          kind: sequence
          max_size: 16
          base: { kind: primitive, primitive: double }
      - name: id
        type: { kind: primitive, primitive: unsigned long }
typedefs:
  - name: Sensors::Matrix
    base:
      kind: array
      dims: [3, 3]
      base: { kind: primitive, primitive: float }
"#;
        let unit = IdlUnit::from_yaml_str(yaml).expect("parse unit");
        assert_eq!(unit.structs.len(), 1);
        assert_eq!(unit.typedefs.len(), 1);
        let TypeNode::Sequence(seq) = &unit.structs[0].fields[0].field_type else {
            panic!("expected sequence");
        };
        assert_eq!(seq.max_size, Some(16));
        assert_eq!(seq.name.to_string(), "Sensors::Reading::samples");
    }

    #[test]
    fn test_unit_rejects_bad_identifier() {
        let json = r#"{"structs":[{"name":"M::S","fields":[{"name":"9lives","type":{"kind":"string"}}]}]}"#;
        let err = IdlUnit::from_json_str(json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidIdentifier(ref n) if n == "9lives"));
    }

    #[test]
    fn test_identifier_regex_is_shared() {
        let first = identifier_regex().expect("pattern");
        let second = identifier_regex().expect("pattern");
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.as_str(), IDENTIFIER_PATTERN);
        assert!(first.is_match("Sensors_v2"));
        assert!(!first.is_match("3D"));
    }
}
