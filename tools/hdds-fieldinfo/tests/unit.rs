// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use hdds_fieldinfo::report::{render_report, to_json};
use hdds_fieldinfo::{resolve_unit, Backend, BackendConfig, IdlUnit, LoadError};
use std::io::Write;

const SENSORS: &str = r#"
structs:
  - name: Sensors::Frame
    fields:
      - name: stamp
        type: { kind: primitive, primitive: unsigned long long }
      - name: pixels
        type:
          kind: array
          dims: [4, 4]
          base: { kind: primitive, primitive: octet }
      - name: tags
        type:
          kind: sequence
          max_size: 8
          base: { kind: string }
  - name: Sensors::Batch
    fields:
      - name: frames
        type:
          kind: sequence
          base: { kind: struct, name: "Sensors::Frame" }
typedefs:
  - name: Sensors::Block
    base:
      kind: array
      dims: [16]
      base: { kind: primitive, primitive: octet }
"#;

#[test]
fn test_unit_from_yaml_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    file.write_all(SENSORS.as_bytes()).expect("write");

    let unit = IdlUnit::from_file(file.path()).expect("load unit");
    let mut backend = Backend::new(BackendConfig::classic(), String::new());
    let info = resolve_unit(&unit, &mut backend).expect("resolve");

    let names: Vec<_> = info.iter().map(|f| f.scoped_type_name().to_string()).collect();
    assert_eq!(
        names,
        [
            "Sensors::_pixels",
            "Sensors::_tags_seq",
            "Sensors::_frames_seq",
            "Sensors::Block"
        ]
    );
    // pixels[4][4] and Block[16] are both 16 octets
    assert_eq!(info.helper_keys().len(), 3);
    assert!(backend.finish().expect("finish").is_empty());
}

#[test]
fn test_modern_header_is_reproducible() {
    let unit = IdlUnit::from_yaml_str(SENSORS).expect("load unit");
    let config = BackendConfig::modern().with_header_guard("SENSORS_TAGS_H");

    let mut headers = Vec::new();
    for _ in 0..2 {
        let mut backend = Backend::new(config.clone(), String::new());
        resolve_unit(&unit, &mut backend).expect("resolve");
        headers.push(backend.finish().expect("finish"));
    }

    assert_eq!(headers[0], headers[1]);
    assert_eq!(
        headers[0],
        "#ifndef SENSORS_TAGS_H\n#define SENSORS_TAGS_H\n\n\
         struct Sensors_Frame_pixels_tag {};\n\n\
         struct Sensors_Frame_tags_tag {};\n\n\
         struct Sensors_Batch_frames_tag {};\n\n\
         struct Sensors_Block_tag {};\n\n\
         #endif /* SENSORS_TAGS_H */\n"
    );
}

#[test]
fn test_reports_cover_every_descriptor() {
    let unit = IdlUnit::from_yaml_str(SENSORS).expect("load unit");
    let mut backend = Backend::new(BackendConfig::classic(), String::new());
    let info = resolve_unit(&unit, &mut backend).expect("resolve");

    let report = render_report(info.iter()).expect("render");
    assert!(report.contains("Sensors::_tags_seq (sequence, classic)"));
    assert!(report.contains("TAO::String_Manager [string]"));
    assert!(report.contains("Sensors::Frame [aggregate]"));
    assert!(report.contains("pointer:    Sensors::Block_forany*"));

    let json = to_json(info.iter()).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value.as_array().map(Vec::len), Some(4));
    assert_eq!(value[2]["unbounded"], true);
    assert_eq!(value[2]["element_wire_size"], 0);
}

#[test]
fn test_unit_from_json() {
    let json = r#"{
        "structs": [{
            "name": "Chat::Message",
            "fields": [{
                "name": "body",
                "type": {"kind": "sequence", "base": {"kind": "primitive", "primitive": "wchar"}}
            }]
        }]
    }"#;
    let unit = IdlUnit::from_json_str(json).expect("load unit");
    let mut backend = Backend::new(BackendConfig::classic(), String::new());
    let info = resolve_unit(&unit, &mut backend).expect("resolve");
    assert_eq!(info.len(), 1);
    assert_eq!(info.fields[0].element_wire_size(), 1);
    assert_eq!(info.fields[0].element_type_name(), "ACE_CDR::WChar");
}

#[test]
fn test_missing_unit_file() {
    let err = IdlUnit::from_file("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
