// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Synthetic names for anonymous arrays and sequences.
//!
//! An anonymous array or sequence carries the scoped name of the member that
//! declares it (`A::B::S::x`). Generated code cannot name it that way, so it
//! gets `_x` (array) or `_x_seq` (sequence) placed in the scope that encloses
//! the structure: `A::B::_x_seq`. A member of a top-level struct `S` is placed
//! in `S` itself (`S::_x_seq`), so it never lands in the global scope.

use crate::ast::{ScopedName, TypeNode, SCOPE_SEPARATOR};

/// Suffix appended to synthetic sequence names.
pub const SEQUENCE_SUFFIX: &str = "_seq";

/// Suffix appended to modern-mapping marker types.
pub const MARKER_SUFFIX: &str = "_tag";

/// `_x` or `_x_seq`.
pub fn canonical_name(local: &str, is_sequence: bool) -> String {
    let mut name = format!("_{local}");
    if is_sequence {
        name.push_str(SEQUENCE_SUFFIX);
    }
    name
}

/// Escape for an underscore inside one marker path component.
const ESCAPED_UNDERSCORE: &str = "_0";

/// Scope enclosing the structure that declares `member`, rendered with `::`.
///
/// `A::B::S::x` gives `A::B`. A member of a top-level struct keeps the struct
/// as its scope: `S::x` gives `S`.
pub fn enclosing_scope(member: &ScopedName) -> String {
    let components = member.components();
    let keep = match components.len() {
        0 | 1 => 0,
        2 => 1,
        n => n - 2,
    };
    components[..keep].join(SCOPE_SEPARATOR)
}

/// Qualify `local` with `scope`, leaving it bare at the top level.
pub fn qualify(scope: &str, local: &str) -> String {
    if scope.is_empty() {
        local.to_string()
    } else {
        format!("{scope}{SCOPE_SEPARATOR}{local}")
    }
}

/// Printable name of any type node.
///
/// Declared types print their scoped name; anonymous arrays and sequences
/// print their synthetic name.
pub fn type_name(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive { primitive } => primitive.idl_name().to_string(),
        TypeNode::String { wide: false, .. } => "string".to_string(),
        TypeNode::String { wide: true, .. } => "wstring".to_string(),
        TypeNode::Enum { name }
        | TypeNode::Alias { name, .. }
        | TypeNode::Struct { name }
        | TypeNode::Union { name } => name.to_string(),
        TypeNode::Array(array) => anonymous_type_name(&array.name, false),
        TypeNode::Sequence(sequence) => anonymous_type_name(&sequence.name, true),
    }
}

/// Synthetic name of an anonymous array/sequence declared by `member`.
pub fn anonymous_type_name(member: &ScopedName, is_sequence: bool) -> String {
    qualify(
        &enclosing_scope(member),
        &canonical_name(member.local_name(), is_sequence),
    )
}

/// Identifier of the empty marker type for a field or named type path.
///
/// Components are joined with `_` and an underscore inside a component is
/// written `_0`, so two paths only share a marker if they are equal.
/// `A::B::S::x` gives `A_B_S_x_tag`; `M::A_B::x` gives `M_A_0B_x_tag`.
pub fn marker_name(path: &ScopedName) -> String {
    let encoded: Vec<String> = path
        .components()
        .iter()
        .map(|component| component.replace('_', ESCAPED_UNDERSCORE))
        .collect();
    format!("{}{MARKER_SUFFIX}", encoded.join("_"))
}
