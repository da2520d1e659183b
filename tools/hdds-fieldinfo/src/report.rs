// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Human-readable and JSON reports of resolved descriptors.

use crate::field_info::{FieldInfo, FieldSummary};
use tera::Tera;

const REPORT_TEMPLATE: &str = r#"{% for field in fields -%}
{{ field.scoped_type_name }} ({{ field.shape }}, {{ field.mapping }})
  element:    {{ field.element_type_name }} [{{ field.element_class }}]
  wire size:  {{ field.element_wire_size }}
  count:      {% if field.unbounded %}unbounded{% else %}{{ field.element_count }}{% endif %}
  reference:  {{ field.reference_type }}
  const ref:  {{ field.const_reference_type }}
{% if field.pointer_type %}  pointer:    {{ field.pointer_type }}
{% endif %}{% if field.marker_type_name %}  marker:     {{ field.marker_type_name }}
{% endif %}
{% endfor -%}
"#;

/// Render the per-field table.
pub fn render_report<'r, 'a: 'r, I>(fields: I) -> Result<String, tera::Error>
where
    I: IntoIterator<Item = &'r FieldInfo<'a>>,
{
    let summaries: Vec<FieldSummary> = fields.into_iter().map(FieldInfo::summary).collect();

    let mut tera = Tera::default();
    tera.add_raw_template("report", REPORT_TEMPLATE)?;

    let mut ctx = tera::Context::new();
    ctx.insert("fields", &summaries);
    tera.render("report", &ctx)
}

/// Serialize the descriptors as pretty JSON.
pub fn to_json<'r, 'a: 'r, I>(fields: I) -> serde_json::Result<String>
where
    I: IntoIterator<Item = &'r FieldInfo<'a>>,
{
    let summaries: Vec<FieldSummary> = fields.into_iter().map(FieldInfo::summary).collect();
    serde_json::to_string_pretty(&summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, PrimitiveKind, TypeNode};
    use crate::backend::Backend;
    use crate::config::BackendConfig;

    #[test]
    fn test_report_lists_fields() {
        let field = Field::new(
            "ids",
            TypeNode::sequence("Fleet::Roster::ids", None, TypeNode::primitive(PrimitiveKind::ULong)),
        );
        let mut backend = Backend::new(BackendConfig::modern(), String::new());
        let info = FieldInfo::from_field(&field, &mut backend).expect("resolve");

        let report = render_report([&info]).expect("render");
        assert!(report.contains("Fleet::_ids_seq (sequence, modern)"));
        assert!(report.contains("ACE_CDR::ULong [primitive(unsigned long)]"));
        assert!(report.contains("count:      unbounded"));
        assert!(report.contains("IDL::DistinctType<Fleet::_ids_seq, Fleet_Roster_ids_tag>"));
        assert!(report.contains("marker:     Fleet_Roster_ids_tag"));
        assert!(!report.contains("pointer:"));
    }

    #[test]
    fn test_json_summary() {
        let field = Field::new(
            "grid",
            TypeNode::array("Map::Tile::grid", vec![4, 4], TypeNode::primitive(PrimitiveKind::Octet)),
        );
        let mut backend = Backend::new(BackendConfig::classic(), String::new());
        let info = FieldInfo::from_field(&field, &mut backend).expect("resolve");

        let json = to_json([&info]).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value[0]["scoped_type_name"], "Map::_grid");
        assert_eq!(value[0]["shape"], "array");
        assert_eq!(value[0]["element_count"], 16);
        assert_eq!(value[0]["pointer_type"], "Map::_grid_forany*");
        assert!(value[0]["marker_type_name"].is_null());
    }
}
