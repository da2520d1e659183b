// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Emission driver.
//!
//! Visits the array and sequence members of each structure and every named
//! array/sequence typedef, strictly in declaration order, so marker types
//! land in the header in a reproducible order.

use crate::ast::{IdlUnit, StructDecl};
use crate::backend::Backend;
use crate::errors::FieldInfoError;
use crate::field_info::{ElementLength, FieldInfo};
use crate::header::HeaderSink;
use std::collections::BTreeSet;

/// Descriptors resolved for one unit.
#[derive(Debug, Default)]
pub struct UnitInfo<'a> {
    /// Anonymous member types, struct by struct.
    pub fields: Vec<FieldInfo<'a>>,
    /// Named array/sequence typedefs.
    pub typedefs: Vec<FieldInfo<'a>>,
}

impl<'a> UnitInfo<'a> {
    /// All descriptors, members first.
    pub fn iter(&self) -> impl Iterator<Item = &FieldInfo<'a>> {
        self.fields.iter().chain(self.typedefs.iter())
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.typedefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct (element, count) pairs; one generated helper each.
    pub fn helper_keys(&self) -> BTreeSet<ElementLength> {
        self.iter().map(FieldInfo::element_length).collect()
    }
}

/// Resolve the anonymous array/sequence members of `decl`. Other members are skipped.
pub fn resolve_struct<'a, S: HeaderSink>(
    decl: &'a StructDecl,
    backend: &mut Backend<S>,
) -> Result<Vec<FieldInfo<'a>>, FieldInfoError> {
    let mut infos = Vec::new();
    for field in &decl.fields {
        if !field.field_type.is_anonymous_type() {
            continue;
        }
        infos.push(FieldInfo::from_field(field, backend)?);
    }
    tracing::debug!(
        name = %decl.name,
        resolved = infos.len(),
        members = decl.fields.len(),
        "resolved struct members"
    );
    Ok(infos)
}

/// Resolve a whole unit: structs in order, then typedefs in order.
pub fn resolve_unit<'a, S: HeaderSink>(
    unit: &'a IdlUnit,
    backend: &mut Backend<S>,
) -> Result<UnitInfo<'a>, FieldInfoError> {
    backend.open_header()?;

    let mut info = UnitInfo::default();
    for decl in &unit.structs {
        info.fields.extend(resolve_struct(decl, backend)?);
    }
    for typedef in &unit.typedefs {
        if !typedef.base.is_anonymous_type() {
            tracing::trace!(typedef = %typedef.name, "skipping non array/sequence typedef");
            continue;
        }
        info.typedefs
            .push(FieldInfo::from_scoped_name(&typedef.name, &typedef.base, backend)?);
    }

    tracing::info!(
        structs = unit.structs.len(),
        descriptors = info.len(),
        markers = backend.declared_markers().len(),
        "[OK] resolved unit"
    );
    Ok(info)
}
