use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Sas,
    X509,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Sas => "sas",
            AuthMethod::X509 => "x509",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a test device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Unprovisioned,
    NameGenerated,
    Created,
    ConnectionStringBuilt,
    Deprovisioned,
}

impl DeviceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceState::Unprovisioned => "unprovisioned",
            DeviceState::NameGenerated => "name_generated",
            DeviceState::Created => "created",
            DeviceState::ConnectionStringBuilt => "connection_string_built",
            DeviceState::Deprovisioned => "deprovisioned",
        }
    }
}

/// A device that exists in the registry and is ready for a test client.
///
/// For SAS devices `primary_authentication` is the device key issued by the
/// registry; for X509 devices it is the configured private key and
/// `certificate` carries the matching certificate.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedDevice {
    pub device_id: String,
    pub auth_method: AuthMethod,
    #[serde(skip_serializing)]
    pub primary_authentication: String,
    pub connection_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
}

impl fmt::Debug for ProvisionedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedDevice")
            .field("device_id", &self.device_id)
            .field("auth_method", &self.auth_method)
            .field("has_certificate", &self.certificate.is_some())
            .finish_non_exhaustive()
    }
}

/// Certificate material used for the X509 test device.
#[derive(Clone, PartialEq, Eq)]
pub struct X509Credentials {
    pub certificate: String,
    pub private_key: String,
    pub thumbprint: String,
}

impl fmt::Debug for X509Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X509Credentials")
            .field("thumbprint", &self.thumbprint)
            .finish_non_exhaustive()
    }
}
