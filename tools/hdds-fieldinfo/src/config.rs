// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Backend configuration.
//!
//! Supports both programmatic and file-based (YAML) configuration. The
//! configuration is passed explicitly to the resolver through [`Backend`].
//!
//! [`Backend`]: crate::backend::Backend

use crate::ast::identifier_regex;
use crate::mapping::LanguageMapping;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// IDL backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Generated-API language mapping.
    #[serde(default)]
    pub language_mapping: LanguageMapping,

    /// Include-guard macro wrapped around the generated header.
    #[serde(default)]
    pub header_guard: Option<String>,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            language_mapping: LanguageMapping::Classic,
            header_guard: None,
            log_level: default_log_level(),
        }
    }
}

impl BackendConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn classic() -> Self {
        Self::default()
    }

    pub fn modern() -> Self {
        Self {
            language_mapping: LanguageMapping::Modern,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_header_guard(mut self, guard: impl Into<String>) -> Self {
        self.header_guard = Some(guard.into());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(guard) = &self.header_guard {
            let macro_name =
                identifier_regex().map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if !macro_name.is_match(guard) {
                return Err(ConfigError::Invalid(format!(
                    "header guard `{}` is not a valid macro name",
                    guard
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::Invalid(format!("unknown log level `{}`", other))),
        }
    }
}
