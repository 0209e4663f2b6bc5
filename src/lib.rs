//! # IoT Hub test account
//!
//! Provisions ephemeral devices on an IoT Hub for end-to-end suites and hands
//! out what the tests need to talk to them.
//!
//! Modules:
//! - `credentials`: hub connection-string parsing, device connection strings, field lookup
//! - `signing`: shared access signature construction
//! - `cache`: memoized service token
//! - `registry`: device registry collaborator and its REST implementation
//! - `provisioning`: test device lifecycle
//! - `account`: the account context and its accessors
//! - `config`: environment and YAML settings

pub mod account;
pub mod cache;
pub mod config;
pub mod credentials;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod provisioning;
pub mod registry;
pub mod service;
pub mod signing;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::account::AccountInfo;
pub use crate::config::AccountConfig;
pub use crate::error::{AccountError, Result};
