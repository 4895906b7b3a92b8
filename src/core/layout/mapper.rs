//! Icon URL rewriting for layout exports
//!
//! Layouts reference node icons by storage-internal addresses. Before a
//! layout leaves the process, every `nodes.<id>.attr.icon.url` is passed
//! through a resource translator so the export service can fetch it.

use crate::domain::Layout;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use url::Url;

/// Provides the current document layout
pub trait LayoutSource: Send + Sync {
    /// Returns a snapshot of the current layout
    fn current_layout(&self) -> Layout;
}

/// In-memory layout source holding a replaceable snapshot
#[derive(Debug, Default)]
pub struct SnapshotLayoutSource {
    layout: RwLock<Layout>,
}

impl SnapshotLayoutSource {
    /// Creates a source serving `layout`
    pub fn new(layout: Layout) -> Self {
        Self {
            layout: RwLock::new(layout),
        }
    }

    /// Replaces the served snapshot
    pub fn replace(&self, layout: Layout) {
        match self.layout.write() {
            Ok(mut guard) => *guard = layout,
            Err(poisoned) => *poisoned.into_inner() = layout,
        }
    }
}

impl LayoutSource for SnapshotLayoutSource {
    fn current_layout(&self) -> Layout {
        match self.layout.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Builds an export function that rewrites icon URLs through `translator`
///
/// Each call reads a fresh snapshot from `source`. Nodes without an icon and
/// layouts without `nodes` pass through unchanged; nothing but
/// `attr.icon.url` is touched.
///
/// # Example
///
/// ```
/// use layout_export::core::layout::{build_layout_exporter, SnapshotLayoutSource};
/// use layout_export::domain::Layout;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let source = Arc::new(SnapshotLayoutSource::new(
///     Layout::try_from(json!({"nodes": {"1": {"attr": {"icon": {"url": "x1"}}}}})).unwrap(),
/// ));
/// let export = build_layout_exporter(source, |url: &str| format!("get+{url}"));
///
/// assert_eq!(
///     serde_json::Value::from(export()),
///     json!({"nodes": {"1": {"attr": {"icon": {"url": "get+x1"}}}}})
/// );
/// ```
pub fn build_layout_exporter<T>(
    source: Arc<dyn LayoutSource>,
    translator: T,
) -> impl Fn() -> Layout + Send + Sync + 'static
where
    T: Fn(&str) -> String + Send + Sync + 'static,
{
    move || {
        let mut layout = source.current_layout();
        if let Some(nodes) = layout.as_map_mut().get_mut("nodes") {
            match nodes {
                Value::Object(nodes) => nodes
                    .values_mut()
                    .for_each(|node| rewrite_icon(node, &translator)),
                Value::Array(nodes) => nodes
                    .iter_mut()
                    .for_each(|node| rewrite_icon(node, &translator)),
                _ => {}
            }
        }
        layout
    }
}

fn rewrite_icon<T>(node: &mut Value, translator: &T)
where
    T: Fn(&str) -> String,
{
    if let Some(Value::String(url)) = node.pointer_mut("/attr/icon/url") {
        let translated = translator(url.as_str());
        *url = translated;
    }
}

/// Translator resolving icon references against a resource base URL
///
/// Absolute references stay absolute; references `Url::join` cannot resolve
/// are returned unchanged.
pub fn resource_url_translator(base: Url) -> impl Fn(&str) -> String + Send + Sync + 'static {
    move |reference| match base.join(reference) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!(reference = %reference, error = %e, "Leaving icon reference as-is");
            reference.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(value: Value) -> Arc<dyn LayoutSource> {
        Arc::new(SnapshotLayoutSource::new(Layout::try_from(value).unwrap()))
    }

    #[test]
    fn test_non_string_icon_url_untouched() {
        let export = build_layout_exporter(
            source(json!({"nodes": {"1": {"attr": {"icon": {"url": 7}}}}})),
            |url: &str| format!("get+{url}"),
        );
        assert_eq!(
            Value::from(export()),
            json!({"nodes": {"1": {"attr": {"icon": {"url": 7}}}}})
        );
    }

    #[test]
    fn test_node_array_rewritten() {
        let export = build_layout_exporter(
            source(json!({"nodes": [{"attr": {"icon": {"url": "a"}}}, {"title": "t"}]})),
            |url: &str| url.to_uppercase(),
        );
        assert_eq!(
            Value::from(export()),
            json!({"nodes": [{"attr": {"icon": {"url": "A"}}}, {"title": "t"}]})
        );
    }

    #[test]
    fn test_snapshot_is_reread_each_call() {
        let snapshot = Arc::new(SnapshotLayoutSource::new(Layout::new()));
        let export = build_layout_exporter(snapshot.clone(), |url: &str| url.to_string());

        assert!(export().is_empty());
        snapshot.replace(Layout::try_from(json!({"links": []})).unwrap());
        assert_eq!(Value::from(export()), json!({"links": []}));
    }

    #[test]
    fn test_resource_url_translator() {
        let translate =
            resource_url_translator(Url::parse("https://static.example.com/icons/").unwrap());
        assert_eq!(translate("x1.png"), "https://static.example.com/icons/x1.png");
        assert_eq!(
            translate("https://cdn.example.org/y.png"),
            "https://cdn.example.org/y.png"
        );
    }
}
