// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Backend state shared across field resolutions.
//!
//! Holds the configuration, the generated-header sink, and the registry of
//! marker types already declared in that header together with their owners. Every resolution borrows the
//! backend mutably, so fields are resolved one at a time in the order the
//! driver visits them and the header stays reproducible.

use crate::ast::ScopedName;
use crate::config::BackendConfig;
use crate::errors::{FieldInfoError, InvalidInput};
use crate::header::HeaderSink;
use crate::mapping::LanguageMapping;
use std::collections::HashMap;
use std::fmt;

/// What a marker type tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerOwner {
    /// Anonymous array/sequence member, by its scoped member name.
    Field(ScopedName),
    /// Named array/sequence type.
    Type(ScopedName),
}

impl MarkerOwner {
    pub fn path(&self) -> &ScopedName {
        match self {
            Self::Field(path) | Self::Type(path) => path,
        }
    }
}

impl fmt::Display for MarkerOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(path) => write!(f, "field `{path}`"),
            Self::Type(path) => write!(f, "type `{path}`"),
        }
    }
}

pub struct Backend<S: HeaderSink = String> {
    config: BackendConfig,
    header: S,
    markers: HashMap<String, MarkerOwner>,
    marker_order: Vec<String>,
    header_opened: bool,
}

impl<S: HeaderSink> Backend<S> {
    pub fn new(config: BackendConfig, header: S) -> Self {
        Self {
            config,
            header,
            markers: HashMap::new(),
            marker_order: Vec::new(),
            header_opened: false,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn language_mapping(&self) -> LanguageMapping {
        self.config.language_mapping
    }

    pub fn header(&self) -> &S {
        &self.header
    }

    /// Marker types declared so far, in declaration order.
    pub fn declared_markers(&self) -> &[String] {
        &self.marker_order
    }

    /// Write the opening include guard, if one is configured. Idempotent.
    pub fn open_header(&mut self) -> Result<(), FieldInfoError> {
        if self.header_opened {
            return Ok(());
        }
        self.header_opened = true;
        if let Some(guard) = &self.config.header_guard {
            self.header
                .append(&format!("#ifndef {guard}\n#define {guard}\n\n"))?;
        }
        Ok(())
    }

    /// Close the include guard and hand back the sink.
    pub fn finish(mut self) -> Result<S, FieldInfoError> {
        if self.header_opened {
            if let Some(guard) = &self.config.header_guard {
                self.header.append(&format!("#endif /* {guard} */\n"))?;
            }
        }
        Ok(self.header)
    }

    /// Declare `struct <marker> {};` once per owner. Returns `false` if the
    /// same owner already declared it.
    ///
    /// A marker already held by a different owner is rejected and nothing is
    /// written.
    pub(crate) fn declare_marker(
        &mut self,
        marker: &str,
        owner: &MarkerOwner,
    ) -> Result<bool, FieldInfoError> {
        match self.markers.get(marker) {
            Some(existing) if existing == owner => {
                tracing::trace!(marker, "marker type already declared");
                return Ok(false);
            }
            Some(existing) => {
                return Err(InvalidInput::MarkerCollision {
                    marker: marker.to_string(),
                    first: existing.to_string(),
                    second: owner.to_string(),
                }
                .into())
            }
            None => {}
        }
        self.header.append(&format!("struct {marker} {{}};\n\n"))?;
        self.markers.insert(marker.to_string(), owner.clone());
        self.marker_order.push(marker.to_string());
        tracing::debug!(marker, "declared marker type");
        Ok(true)
    }
}
