// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for the field resolver
//!
//! Builds arbitrary array/sequence members (and non-collection members) from
//! raw bytes and resolves them under both language mappings:
//! - resolution must return a descriptor or an `InvalidInput`, never panic
//! - a second resolution of the same member must not grow the header

#![no_main]

use hdds_fieldinfo::{
    Backend, BackendConfig, Field, FieldInfo, PrimitiveKind, StructDecl, TypeNode,
};
use libfuzzer_sys::fuzz_target;

/// Map a byte to an element type
fn byte_to_element(b: u8) -> TypeNode {
    match b % 6 {
        0 => TypeNode::primitive(PrimitiveKind::ALL[usize::from(b / 6) % PrimitiveKind::ALL.len()]),
        1 => TypeNode::string(),
        2 => TypeNode::wstring(),
        3 => TypeNode::enumeration("Fuzz::Kind"),
        4 => TypeNode::alias("Fuzz::Alias", TypeNode::primitive(PrimitiveKind::Double)),
        _ => TypeNode::structure("Fuzz::Inner"),
    }
}

/// Map a byte pair to a member type
fn bytes_to_type(data: &[u8]) -> TypeNode {
    let selector = data.first().copied().unwrap_or(0);
    let element = byte_to_element(data.get(1).copied().unwrap_or(0));
    match selector % 3 {
        0 => {
            let dims = data
                .iter()
                .skip(2)
                .take(4)
                .map(|b| u32::from(*b) << (b % 24))
                .collect();
            TypeNode::array("", dims, element)
        }
        1 => {
            let bound = data.get(2).map(|b| u32::from(*b));
            TypeNode::sequence("", bound, element)
        }
        _ => element,
    }
}

fuzz_target!(|data: &[u8]| {
    let name = if data.len() % 2 == 0 { "member" } else { "" };
    let decl = StructDecl::new("Fuzz::Outer::S").with_fields(vec![Field::new(name, bytes_to_type(data))]);

    for config in [BackendConfig::classic(), BackendConfig::modern()] {
        let mut backend = Backend::new(config, String::new());
        if FieldInfo::from_field(&decl.fields[0], &mut backend).is_ok() {
            let before = backend.header().len();
            let _ = FieldInfo::from_field(&decl.fields[0], &mut backend);
            assert_eq!(before, backend.header().len());
        }
    }
});
