//! Unified text and JSON Patch rendering tests.

use diffnest_core::{
    match_documents, patch_operations, render_patch, render_unified, ArrayStrategy, Comparator,
    ContextMode, DiffOptions, PatchOp, Value,
};
use serde_json::json;

fn unified(a: serde_json::Value, b: serde_json::Value, mode: ContextMode) -> String {
    let (a, b) = (Value::from(a), Value::from(b));
    let diff = Comparator::default().compare(Some(&a), Some(&b));
    render_unified(&[diff], mode)
}

fn patch(a: serde_json::Value, b: serde_json::Value, options: DiffOptions) -> Vec<PatchOp> {
    let (a, b) = (Value::from(a), Value::from(b));
    let diff = Comparator::new(options).compare(Some(&a), Some(&b));
    patch_operations(&[diff])
}

fn op(op: &'static str, path: &str, value: Option<serde_json::Value>) -> PatchOp {
    PatchOp {
        op,
        path: path.to_string(),
        value,
    }
}

// ============================================================================
// 1. Unified: leaves and context
// ============================================================================

#[test]
fn modified_leaf_renders_removed_then_added() {
    let text = unified(json!({"name": "John"}), json!({"name": "Jane"}), ContextMode::DiffOnly);
    assert_eq!(text, "- name: John\n+ name: Jane\n");
}

#[test]
fn nested_paths_are_dotted() {
    let text = unified(
        json!({"spec": {"replicas": 2}}),
        json!({"spec": {"replicas": 3}}),
        ContextMode::DiffOnly,
    );
    assert_eq!(text, "- spec.replicas: 2\n+ spec.replicas: 3\n");
}

#[test]
fn context_lines_surround_change() {
    let text = unified(
        json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}),
        json!({"a": 1, "b": 2, "c": 30, "d": 4, "e": 5}),
        ContextMode::Lines(1),
    );
    assert_eq!(text, "  b: 2\n- c: 3\n+ c: 30\n  d: 4\n");
}

#[test]
fn elision_marks_gap_between_runs() {
    let text = unified(
        json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6, "g": 7}),
        json!({"a": 10, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6, "g": 70}),
        ContextMode::Lines(1),
    );
    assert_eq!(
        text,
        "- a: 1\n+ a: 10\n  b: 2\n  ...\n  f: 6\n- g: 7\n+ g: 70\n"
    );
}

#[test]
fn show_all_lists_every_leaf_sorted() {
    let text = unified(
        json!({"name": "John", "age": 30, "meta": {"id": 1}}),
        json!({"name": "John", "age": 30, "meta": {"id": 1}}),
        ContextMode::ShowAll,
    );
    assert_eq!(text, "  age: 30\n  meta.id: 1\n  name: John\n");
}

#[test]
fn identical_documents_render_nothing_in_diff_only() {
    let text = unified(json!({"a": 1}), json!({"a": 1}), ContextMode::DiffOnly);
    assert_eq!(text, "");
}

#[test]
fn unchanged_container_context_is_summarised() {
    let text = unified(
        json!({"a": 1, "b": {"x": 1, "y": 2}}),
        json!({"a": 2, "b": {"x": 1, "y": 2}}),
        ContextMode::Lines(1),
    );
    assert_eq!(text, "- a: 1\n+ a: 2\n  b: {2 fields}\n");
}

// ============================================================================
// 2. Unified: whole values and multiline strings
// ============================================================================

#[test]
fn added_container_lists_nested_entries() {
    let text = unified(
        json!({}),
        json!({"spec": {"replicas": 3, "ports": [80]}}),
        ContextMode::DiffOnly,
    );
    assert_eq!(
        text,
        "+ spec:\n+   replicas: 3\n+   ports:\n+     [0]: 80\n"
    );
}

#[test]
fn type_change_renders_both_values() {
    let text = unified(json!({"a": [1]}), json!({"a": 5}), ContextMode::DiffOnly);
    assert_eq!(text, "- a:\n-   [0]: 1\n+ a: 5\n");
}

#[test]
fn multiline_strings_render_per_line() {
    let text = unified(
        json!({"script": "a\nb\nc"}),
        json!({"script": "a\nX\nc"}),
        ContextMode::Lines(3),
    );
    assert_eq!(text, "  script:\n     a\n-    b\n+    X\n     c\n");
}

#[test]
fn multiline_lines_respect_context() {
    let text = unified(
        json!({"s": "1\n2\n3\n4\n5\n6"}),
        json!({"s": "x\n2\n3\n4\n5\ny"}),
        ContextMode::Lines(0),
    );
    assert_eq!(text, "  s:\n-    1\n+    x\n     ...\n-    6\n+    y\n");
}

#[test]
fn multiline_root_document_has_no_header() {
    let text = unified(json!("a\nb"), json!("a\nc"), ContextMode::Lines(3));
    assert_eq!(text, "   a\n-  b\n+  c\n");
}

#[test]
fn unchanged_multiline_context_stays_on_one_line() {
    let text = unified(
        json!({"a": 1, "script": "x\ny"}),
        json!({"a": 2, "script": "x\ny"}),
        ContextMode::Lines(1),
    );
    assert_eq!(text, "- a: 1\n+ a: 2\n  script: x\\ny\n");
}

#[test]
fn added_multiline_value_stays_on_one_line() {
    let text = unified(json!({}), json!({"note": "x\ny"}), ContextMode::DiffOnly);
    assert_eq!(text, "+ note: x\\ny\n");
}

// ============================================================================
// 3. Unified: document streams
// ============================================================================

#[test]
fn documents_are_separated() {
    let a = vec![
        Value::from(json!({"n": "x", "v": 1})),
        Value::from(json!({"n": "y", "v": 1})),
    ];
    let b = vec![
        Value::from(json!({"n": "x", "v": 2})),
        Value::from(json!({"n": "y", "v": 2})),
    ];
    let results = match_documents(&a, &b, DiffOptions::default());
    let text = render_unified(&results, ContextMode::DiffOnly);
    assert_eq!(text, "- v: 1\n+ v: 2\n---\n- v: 1\n+ v: 2\n");
}

#[test]
fn skipped_documents_leave_a_marker() {
    let a = vec![
        Value::from(json!({"n": "x", "v": 1})),
        Value::from(json!({"n": "y"})),
        Value::from(json!({"n": "z", "v": 1})),
    ];
    let b = vec![
        Value::from(json!({"n": "x", "v": 2})),
        Value::from(json!({"n": "y"})),
        Value::from(json!({"n": "z", "v": 2})),
    ];
    let results = match_documents(&a, &b, DiffOptions::default());
    let text = render_unified(&results, ContextMode::Lines(0));
    assert_eq!(text, "- v: 1\n+ v: 2\n---\n  ...\n- v: 1\n+ v: 2\n");
}

#[test]
fn deleted_document_renders_its_fields() {
    let a = vec![Value::from(json!({"name": "x"})), Value::from(json!({"name": "y"}))];
    let b = vec![Value::from(json!({"name": "y"}))];
    let results = match_documents(&a, &b, DiffOptions::default());
    let text = render_unified(&results, ContextMode::DiffOnly);
    assert_eq!(text, "- name: x\n");
}

// ============================================================================
// 4. JSON Patch
// ============================================================================

#[test]
fn modified_leaf_is_replaced() {
    let ops = patch(json!({"name": "John"}), json!({"name": "Jane"}), DiffOptions::default());
    assert_eq!(ops, vec![op("replace", "/name", Some(json!("Jane")))]);
}

#[test]
fn pointer_segments_are_escaped() {
    let ops = patch(
        json!({"a/b": 1, "c~d": 2}),
        json!({"c~d": 2, "e": {"f": 3}}),
        DiffOptions::default(),
    );
    assert_eq!(
        ops,
        vec![
            op("remove", "/a~1b", None),
            op("add", "/e", Some(json!({"f": 3}))),
        ]
    );
}

#[test]
fn array_elements_use_bare_indices() {
    let options = DiffOptions {
        array_strategy: ArrayStrategy::Index,
        ..DiffOptions::default()
    };
    let ops = patch(
        json!({"ports": [80, 443]}),
        json!({"ports": [80, 8443, 9090]}),
        options,
    );
    assert_eq!(
        ops,
        vec![
            op("replace", "/ports/1", Some(json!(8443))),
            op("add", "/ports/2", Some(json!(9090))),
        ]
    );
}

#[test]
fn multiline_string_is_replaced_whole() {
    let ops = patch(
        json!({"script": "a\nb"}),
        json!({"script": "a\nc"}),
        DiffOptions::default(),
    );
    assert_eq!(ops, vec![op("replace", "/script", Some(json!("a\nc")))]);
}

#[test]
fn added_document_uses_root_pointer() {
    let a: Vec<Value> = Vec::new();
    let b = vec![Value::from(json!({"k": 1})), Value::from(json!({"k": 2}))];
    let results = match_documents(&a, &b, DiffOptions::default());
    let ops = patch_operations(&results);
    assert_eq!(ops.len(), 2);
    assert!(ops.iter().all(|o| o.op == "add" && o.path.is_empty()));
}

#[test]
fn empty_patch_renders_empty_array() {
    let (a, b) = (Value::from(json!({"a": 1})), Value::from(json!({"a": 1})));
    let diff = Comparator::default().compare(Some(&a), Some(&b));
    assert_eq!(render_patch(&[diff]).unwrap(), "[]\n");
}

#[test]
fn rendered_patch_is_valid_json() {
    let (a, b) = (Value::from(json!({"a": 1, "b": 2})), Value::from(json!({"a": 2})));
    let diff = Comparator::default().compare(Some(&a), Some(&b));
    let text = render_patch(&[diff]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"op": "replace", "path": "/a", "value": 2},
            {"op": "remove", "path": "/b"}
        ])
    );
}
