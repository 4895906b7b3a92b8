//! HTTP implementations of the configuration generator and storage transport

pub mod client;
pub mod configuration;
pub mod storage;

pub use client::build_client;
pub use configuration::HttpConfigurationGenerator;
pub use storage::HttpStorageTransport;
