//! Device registry collaborator.
//!
//! `rest` talks to the hub's REST API; tests plug in their own implementation.

use std::future::Future;

use crate::error::Result;

pub mod headers;
pub mod rest;
pub mod models;

pub use rest::HttpRegistryManager;
pub use models::{DeviceCreate, RegisteredDevice};

pub trait DeviceRegistry {
    /// Create a device identity and return the registry's view of it.
    fn create_device(
        &self,
        request: &DeviceCreate,
    ) -> impl Future<Output = Result<RegisteredDevice>> + Send;

    fn delete_device(&self, device_id: &str) -> impl Future<Output = Result<()>> + Send;
}
