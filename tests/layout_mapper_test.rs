//! Integration tests for the layout mapper
//!
//! These tests verify that exported layouts have icon references rewritten
//! and that everything else passes through untouched.

use layout_export::core::layout::{
    build_layout_exporter, resource_url_translator, LayoutSource, SnapshotLayoutSource,
};
use layout_export::domain::Layout;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

fn source(value: Value) -> Arc<SnapshotLayoutSource> {
    Arc::new(SnapshotLayoutSource::new(Layout::try_from(value).unwrap()))
}

fn get_prefix(url: &str) -> String {
    format!("get+{url}")
}

#[test]
fn test_rewrites_node_icons() {
    let source = source(json!({
        "nodes": {
            "1": {"title": "first", "attr": {"icon": {"url": "x1"}}},
            "2": {"title": "no icon"}
        }
    }));
    let export = build_layout_exporter(source.clone(), get_prefix);

    assert_eq!(
        Value::from(export()),
        json!({
            "nodes": {
                "1": {"title": "first", "attr": {"icon": {"url": "get+x1"}}},
                "2": {"title": "no icon"}
            }
        })
    );

    // The source snapshot is left as it was.
    assert_eq!(
        source.current_layout().get("nodes").unwrap()["1"]["attr"]["icon"]["url"],
        json!("x1")
    );
}

#[test]
fn test_rewrites_every_icon() {
    let source = source(json!({
        "nodes": {
            "1": {"attr": {"icon": {"url": "x1"}}},
            "2": {"attr": {"icon": {"url": "x2"}, "color": "red"}}
        },
        "links": [{"from": "1", "to": "2"}]
    }));
    let export = build_layout_exporter(source, get_prefix);

    assert_eq!(
        Value::from(export()),
        json!({
            "nodes": {
                "1": {"attr": {"icon": {"url": "get+x1"}}},
                "2": {"attr": {"icon": {"url": "get+x2"}, "color": "red"}}
            },
            "links": [{"from": "1", "to": "2"}]
        })
    );
}

#[test]
fn test_links_only_layout_passes_through() {
    let original = json!({"links": [{"from": "a", "to": "b"}]});
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let export = build_layout_exporter(source(original.clone()), move |url: &str| {
        counted.fetch_add(1, Ordering::SeqCst);
        url.to_string()
    });

    assert_eq!(Value::from(export()), original);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_reads_source_on_every_call() {
    let source = source(json!({"nodes": {"1": {"attr": {"icon": {"url": "x1"}}}}}));
    let export = build_layout_exporter(source.clone(), get_prefix);
    let _ = export();

    source.replace(Layout::try_from(json!({"nodes": {"1": {"attr": {"icon": {"url": "x9"}}}}})).unwrap());
    assert_eq!(
        Value::from(export()),
        json!({"nodes": {"1": {"attr": {"icon": {"url": "get+x9"}}}}})
    );
}

#[test]
fn test_resource_translator_resolves_relative_icons() {
    let base = Url::parse("https://static.example.com/icons/").unwrap();
    let source = source(json!({
        "nodes": [
            {"attr": {"icon": {"url": "server.svg"}}},
            {"attr": {"icon": {"url": "https://cdn.example.com/db.svg"}}}
        ]
    }));
    let export = build_layout_exporter(source, resource_url_translator(base));

    assert_eq!(
        Value::from(export()),
        json!({
            "nodes": [
                {"attr": {"icon": {"url": "https://static.example.com/icons/server.svg"}}},
                {"attr": {"icon": {"url": "https://cdn.example.com/db.svg"}}}
            ]
        })
    );
}
