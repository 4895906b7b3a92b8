//! Layout sources, icon rewriting and per-format export functions

pub mod formats;
pub mod mapper;

pub use formats::{ExportFn, ExportFunctions};
pub use mapper::{build_layout_exporter, resource_url_translator, LayoutSource, SnapshotLayoutSource};
