//! Per-format export functions
//!
//! Each supported format registers a function producing the current document
//! snapshot for that format. Formats are resolved by exact name.

use crate::domain::ids::FormatName;
use crate::domain::Layout;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Snapshot function for one format
pub type ExportFn = Arc<dyn Fn() -> Layout + Send + Sync>;

/// Registry of export functions keyed by format
#[derive(Clone, Default)]
pub struct ExportFunctions {
    functions: HashMap<FormatName, ExportFn>,
}

impl ExportFunctions {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the export function for `format`
    pub fn register<F>(&mut self, format: FormatName, function: F)
    where
        F: Fn() -> Layout + Send + Sync + 'static,
    {
        if self.functions.insert(format.clone(), Arc::new(function)).is_some() {
            tracing::debug!(format = %format, "Replaced export function");
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<F>(mut self, format: FormatName, function: F) -> Self
    where
        F: Fn() -> Layout + Send + Sync + 'static,
    {
        self.register(format, function);
        self
    }

    /// Looks up the export function for `format`
    pub fn resolve(&self, format: &FormatName) -> Option<ExportFn> {
        self.functions.get(format).cloned()
    }

    /// Registered formats in sorted order
    pub fn formats(&self) -> Vec<&FormatName> {
        let mut formats: Vec<_> = self.functions.keys().collect();
        formats.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        formats
    }
}

impl fmt::Debug for ExportFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportFunctions")
            .field("formats", &self.formats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn format(name: &str) -> FormatName {
        FormatName::new(name).unwrap()
    }

    #[test]
    fn test_resolve_exact_match() {
        let functions = ExportFunctions::new().with(format("pdf"), || {
            Layout::try_from(json!({"a": "b"})).unwrap()
        });

        let export = functions.resolve(&format("pdf")).unwrap();
        assert_eq!(export().get("a"), Some(&json!("b")));
        assert!(functions.resolve(&format("PDF")).is_none());
        assert!(functions.resolve(&format("png")).is_none());
    }

    #[test]
    fn test_formats_sorted() {
        let functions = ExportFunctions::new()
            .with(format("png"), Layout::new)
            .with(format("pdf"), Layout::new);

        let names: Vec<_> = functions.formats().iter().map(|f| f.as_str()).collect();
        assert_eq!(names, ["pdf", "png"]);
    }
}
