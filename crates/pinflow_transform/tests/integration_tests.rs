//! Integration tests for pinflow_transform crate
//!
//! Drives whole documents through the transform and checks the runtime shape

use pinflow_transform::prelude::*;
use serde_json::{json, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn add_document() -> Value {
    json!({
        "patches": {
            "@/main": {
                "id": "@/main",
                "nodes": {
                    "n1": { "id": "n1", "typeId": "add" },
                    "n2": { "id": "n2", "typeId": "add" }
                },
                "pins": {
                    "p1": { "id": "p1", "nodeId": "n1", "key": "a" },
                    "p2": { "id": "p2", "nodeId": "n1", "key": "b" },
                    "p3": { "id": "p3", "nodeId": "n1", "key": "sum" },
                    "p4": { "id": "p4", "nodeId": "n2", "key": "a" },
                    "p5": { "id": "p5", "nodeId": "n2", "key": "b" },
                    "p6": { "id": "p6", "nodeId": "n2", "key": "sum" }
                },
                "links": {
                    "l1": { "id": "l1", "pins": ["p3", "p4"] }
                }
            }
        },
        "nodeTypes": {
            "add": {
                "pure": true,
                "evaluate": "add",
                "pins": {
                    "a": { "key": "a", "direction": "input", "type": "number" },
                    "b": { "key": "b", "direction": "input", "type": "number" },
                    "sum": { "key": "sum", "direction": "output", "type": "number" }
                }
            }
        }
    })
}

#[test]
fn test_empty_project_yields_empty_mapping() {
    let project = Project::from_value(json!({ "patches": {}, "nodeTypes": {} })).unwrap();
    assert!(transform(&project).is_empty());
}

#[test]
fn test_end_to_end_add_chain() {
    init_logging();

    let project = Project::from_value(add_document()).unwrap();
    let nodes = transform(&project);
    let output = to_json_value(&nodes).unwrap();

    assert_eq!(
        output,
        json!({
            "n1": {
                "id": "n1",
                "pure": true,
                "evaluate": "add",
                "inputTypes": { "a": "Number", "b": "Number" },
                "outLinks": [ { "sum": { "nodeId": "n2", "key": "a" } } ]
            },
            "n2": {
                "id": "n2",
                "pure": true,
                "evaluate": "add",
                "inputTypes": { "a": "Number", "b": "Number" },
                "outLinks": []
            }
        })
    );

    let keys: Vec<_> = nodes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["n1", "n2"]);
}

#[test]
fn test_fan_out_keeps_link_order() {
    init_logging();

    let project = Project::from_value(json!({
        "patches": {
            "main": {
                "nodes": {
                    "A": { "id": "A", "typeId": "source" },
                    "B": { "id": "B", "typeId": "sink" },
                    "C": { "id": "C", "typeId": "sink" }
                },
                "pins": {
                    "A.out": { "id": "A.out", "nodeId": "A", "key": "out" },
                    "B.in": { "id": "B.in", "nodeId": "B", "key": "in" },
                    "C.in": { "id": "C.in", "nodeId": "C", "key": "in" }
                },
                "links": {
                    "toC": { "id": "toC", "pins": ["A.out", "C.in"] },
                    "toB": { "id": "toB", "pins": ["A.out", "B.in"] }
                }
            }
        },
        "nodeTypes": {
            "source": {
                "pins": { "out": { "key": "out", "direction": "output", "type": "pulse" } }
            },
            "sink": {
                "pins": { "in": { "key": "in", "direction": "input", "type": "pulse" } }
            }
        }
    }))
    .unwrap();

    let nodes = transform(&project);
    let a = &nodes["A"];

    assert_eq!(
        a.out_links,
        vec![
            OutLink::new("out", Destination::new("C", "in")),
            OutLink::new("out", Destination::new("B", "in")),
        ]
    );
    assert_eq!(a.out_links_by_pin()["out"].len(), 2);
    assert_eq!(nodes["B"].input_types["in"], NativeType::Boolean);
}

#[test]
fn test_unlinked_output_is_absent() {
    let project = Project::from_value(json!({
        "patches": {
            "main": {
                "nodes": { "n": { "id": "n", "typeId": "split" } },
                "pins": {
                    "n.hi": { "id": "n.hi", "nodeId": "n", "key": "hi" },
                    "n.lo": { "id": "n.lo", "nodeId": "n", "key": "lo" },
                    "m.in": { "id": "m.in", "nodeId": "m", "key": "in" }
                },
                "links": { "l": { "pins": ["n.lo", "m.in"] } }
            }
        },
        "nodeTypes": {
            "split": {
                "pins": {
                    "hi": { "key": "hi", "direction": "output", "type": "number" },
                    "lo": { "key": "lo", "direction": "output", "type": "number" }
                }
            }
        }
    }))
    .unwrap();

    let nodes = transform(&project);
    let grouped = nodes["n"].out_links_by_pin();
    assert!(!grouped.contains_key("hi"));
    assert_eq!(grouped["lo"], vec![&Destination::new("m", "in")]);
}

#[test]
fn test_missing_node_type_degrades_without_error() {
    init_logging();

    let project = Project::from_value(json!({
        "patches": {
            "main": { "nodes": { "x": { "id": "x", "typeId": "nowhere" } } }
        }
    }))
    .unwrap();

    let report = Transformer::new(&project).run();
    let x = &report.nodes["x"];
    assert!(x.input_types.is_empty());
    assert!(x.out_links.is_empty());
    assert_eq!(
        to_json_value(&report.nodes).unwrap(),
        json!({ "x": { "id": "x", "inputTypes": {}, "outLinks": [] } })
    );
    assert!(report.has_warnings());
}

#[test]
fn test_native_types_and_passthrough() {
    let project = Project::from_value(json!({
        "patches": { "main": { "nodes": { "n": { "id": "n", "typeId": "all" } } } },
        "nodeTypes": {
            "all": {
                "pins": {
                    "p": { "key": "p", "direction": "input", "type": "pulse" },
                    "b": { "key": "b", "direction": "input", "type": "boolean" },
                    "n": { "key": "n", "direction": "input", "type": "number" },
                    "s": { "key": "s", "direction": "input", "type": "string" },
                    "c": { "key": "c", "direction": "input", "type": "color" }
                }
            }
        }
    }))
    .unwrap();

    let output = to_json_value(&transform(&project)).unwrap();
    assert_eq!(
        output["n"]["inputTypes"],
        json!({ "p": "Boolean", "b": "Boolean", "n": "Number", "s": "String", "c": "color" })
    );
}

#[test]
fn test_later_patch_redefines_pin() {
    init_logging();

    // p3 is re-keyed by the second patch, so n1 loses its `sum` instance
    let mut document = add_document();
    document["patches"]["@/override"] = json!({
        "id": "@/override",
        "pins": { "p3": { "id": "p3", "nodeId": "n1", "key": "b" } }
    });

    let project = Project::from_value(document).unwrap();
    let merged = merge_patches(&project);
    assert_eq!(merged.pin_by_id("p3").unwrap().key.as_deref(), Some("b"));

    let report = Transformer::with_config(&project, TransformConfig::default().quiet()).run();
    assert!(report.nodes["n1"].out_links.is_empty());
    assert!(report.diagnostics.contains(&Diagnostic::MissingPinInstance {
        node: "n1".into(),
        pin_key: "sum".into(),
    }));
}

#[test]
fn test_strict_mode_from_config() {
    let mut document = add_document();
    document["patches"]["@/main"]["links"]["l2"] = json!({ "pins": ["p6", "p404"] });
    let project = Project::from_value(document).unwrap();

    let config = TransformConfig::from_json(r#"{ "strict": true, "logDiagnostics": false }"#).unwrap();
    let error = Transformer::with_config(&project, config).try_run().unwrap_err();
    assert!(error.to_string().contains("p404"));

    let report = Transformer::new(&project).try_run().unwrap();
    assert_eq!(
        to_json_value(&report.nodes).unwrap()["n2"]["outLinks"],
        json!([{ "sum": {} }])
    );
}

#[test]
fn test_transform_json_text() {
    let source = serde_json::to_string(&add_document()).unwrap();
    let nodes = transform_json(&source).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes["n1"].out_links[0].pin_key, "sum");
}

#[test]
fn test_numeric_node_id_is_transformed() {
    init_logging();

    let project = Project::from_value(json!({
        "patches": {
            "main": {
                "id": 3,
                "nodes": {
                    "1": { "id": 1, "typeId": "add" },
                    "2": { "id": 2, "typeId": "add" }
                },
                "pins": {
                    "p1": { "id": "p1", "nodeId": 1, "key": "sum" },
                    "p2": { "id": "p2", "nodeId": 2, "key": "a" }
                },
                "links": { "l1": { "id": 9, "pins": ["p1", "p2"] } }
            }
        },
        "nodeTypes": add_document()["nodeTypes"].clone()
    }))
    .unwrap();

    let output = to_json_value(&transform(&project)).unwrap();
    assert_eq!(output["1"]["id"], json!("1"));
    assert_eq!(output["1"]["outLinks"], json!([{ "sum": { "nodeId": "2", "key": "a" } }]));
    assert_eq!(output["2"]["inputTypes"], json!({ "a": "Number", "b": "Number" }));
}
