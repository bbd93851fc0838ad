//! Decoding tests for JSON and YAML document streams.

use diffnest_core::{
    detect_format, diff_documents, has_differences, match_documents, parse_documents, DiffOptions,
    DiffnestError, Format, Number, Status, Value,
};

fn keys(value: &Value) -> Vec<&str> {
    match value {
        Value::Object(fields) => fields.iter().map(|(k, _)| k.as_str()).collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// 1. JSON
// ============================================================================

#[test]
fn json_single_document() {
    let docs = parse_documents(r#"{"a": 1, "b": [true, null]}"#, Format::Json).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].leaf_count(), 3);
}

#[test]
fn json_lines_yield_one_document_per_line() {
    let text = "{\"id\": 1}\n{\"id\": 2}\n{\"id\": 3}\n";
    let docs = parse_documents(text, Format::Json).unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[2].get("id"), Some(&Value::Number(Number::Int(3))));
}

#[test]
fn json_blank_input_has_no_documents() {
    assert!(parse_documents("", Format::Json).unwrap().is_empty());
    assert!(parse_documents("  \n", Format::Json).unwrap().is_empty());
}

#[test]
fn json_preserves_key_order() {
    let docs = parse_documents(r#"{"z": 1, "a": 2, "m": 3}"#, Format::Json).unwrap();
    assert_eq!(keys(&docs[0]), vec!["z", "a", "m"]);
}

#[test]
fn json_syntax_error_is_reported() {
    let err = parse_documents("{\"a\": ", Format::Json).unwrap_err();
    assert!(matches!(err, DiffnestError::JsonParse(_)));
}

// ============================================================================
// 2. YAML
// ============================================================================

#[test]
fn yaml_stream_yields_each_document() {
    let text = "kind: Pod\n---\nkind: Service\n";
    let docs = parse_documents(text, Format::Yaml).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].get("kind").and_then(Value::as_str), Some("Service"));
}

#[test]
fn yaml_empty_input_has_no_documents() {
    assert!(parse_documents("", Format::Yaml).unwrap().is_empty());
}

#[test]
fn yaml_null_documents_are_skipped() {
    let docs = parse_documents("a: 1\n--- null\n---\nb: 2\n", Format::Yaml).unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn json_null_documents_are_kept() {
    let docs = parse_documents("{\"a\": 1}\nnull\n", Format::Json).unwrap();
    assert_eq!(
        docs,
        vec![
            Value::Object(vec![("a".to_string(), Value::Number(Number::Int(1)))]),
            Value::Null,
        ]
    );
}

#[test]
fn yaml_nan_document_matches_itself() {
    let docs = parse_documents("x: .nan\n", Format::Yaml).unwrap();
    let results = match_documents(&docs, &docs, DiffOptions::default());
    assert_eq!(results[0].status, Status::Same);
    assert!(!has_differences(&results));
}

#[test]
fn yaml_numbers_keep_integer_and_float_kinds() {
    let docs = parse_documents("n: 42\nf: 1.5\nneg: -3\n", Format::Yaml).unwrap();
    assert_eq!(docs[0].get("n"), Some(&Value::Number(Number::Int(42))));
    assert_eq!(docs[0].get("f"), Some(&Value::Number(Number::Float(1.5))));
    assert_eq!(docs[0].get("neg"), Some(&Value::Number(Number::Int(-3))));
}

#[test]
fn yaml_scalar_keys_are_stringified() {
    let docs = parse_documents("1: one\ntrue: yes\n", Format::Yaml).unwrap();
    assert_eq!(keys(&docs[0]), vec!["1", "true"]);
}

#[test]
fn yaml_tags_are_dropped() {
    let docs = parse_documents("x: !custom 5\n", Format::Yaml).unwrap();
    assert_eq!(docs[0].get("x"), Some(&Value::Number(Number::Int(5))));
}

#[test]
fn yaml_accepts_json_syntax() {
    let docs = parse_documents(r#"{"a": [1, 2]}"#, Format::Yaml).unwrap();
    assert_eq!(docs[0].leaf_count(), 2);
}

#[test]
fn yaml_syntax_error_is_reported() {
    let err = parse_documents("a: [1, 2\n", Format::Yaml).unwrap_err();
    assert!(matches!(err, DiffnestError::YamlParse(_)));
}

// ============================================================================
// 3. Format selection
// ============================================================================

#[test]
fn format_detected_from_extension() {
    assert_eq!(detect_format("a.json").unwrap(), Format::Json);
    assert_eq!(detect_format("dir/a.JSON").unwrap(), Format::Json);
    assert_eq!(detect_format("a.yaml").unwrap(), Format::Yaml);
    assert_eq!(detect_format("a.yml").unwrap(), Format::Yaml);
}

#[test]
fn stdin_and_unknown_extensions_fall_back_to_yaml() {
    assert_eq!(detect_format("-").unwrap(), Format::Yaml);
    assert_eq!(detect_format("manifest.txt").unwrap(), Format::Yaml);
    assert_eq!(detect_format("Makefile").unwrap(), Format::Yaml);
}

#[test]
fn toml_is_unsupported() {
    let err = detect_format("config.toml").unwrap_err();
    assert!(matches!(err, DiffnestError::UnsupportedFormat(_)));
    assert!(err.to_string().contains("toml"));
}

#[test]
fn format_names_parse() {
    assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
    assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
    assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
    assert!("xml".parse::<Format>().is_err());
    assert_eq!(Format::Json.to_string(), "json");
}

// ============================================================================
// 4. End to end
// ============================================================================

#[test]
fn yaml_and_json_sources_compare_by_value() {
    let yaml = "name: web\nreplicas: 3\n";
    let json = r#"{"replicas": 3.0, "name": "web"}"#;
    let results =
        diff_documents(yaml, Format::Yaml, json, Format::Json, DiffOptions::default()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, Status::Same);
}

#[test]
fn decode_error_aborts_diff() {
    let result = diff_documents("a: 1", Format::Yaml, "{", Format::Json, DiffOptions::default());
    assert!(result.is_err());
}
