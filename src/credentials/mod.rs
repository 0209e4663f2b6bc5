//! Connection-string handling: parsing the hub credential, building device
//! connection strings and pulling single fields out of arbitrary ones.

pub mod builder;
pub mod connection_string;
pub mod key_extractor;

pub use builder::build_device_connection_string;
pub use connection_string::HubCredential;
pub use key_extractor::{extract_field, SHARED_ACCESS_KEY_FIELD};
