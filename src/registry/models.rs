use serde::{Deserialize, Serialize};

use crate::provisioning::device::AuthMethod;

/// Request to create one device identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCreate {
    pub device_id: String,
    pub auth_method: AuthMethod,
    /// Symmetric key for SAS devices (empty lets the service generate one),
    /// primary thumbprint for X509 devices.
    pub primary_key: String,
    pub secondary_key: String,
}

impl DeviceCreate {
    pub fn sas(device_id: &str) -> Self {
        Self {
            device_id: device_id.to_owned(),
            auth_method: AuthMethod::Sas,
            primary_key: String::new(),
            secondary_key: String::new(),
        }
    }

    pub fn x509_thumbprint(device_id: &str, thumbprint: &str) -> Self {
        Self {
            device_id: device_id.to_owned(),
            auth_method: AuthMethod::X509,
            primary_key: thumbprint.to_owned(),
            secondary_key: String::new(),
        }
    }
}

// ================================
// Wire format
// ================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymmetricKey {
    pub primary_key: Option<String>,
    pub secondary_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct X509Thumbprint {
    pub primary_thumbprint: Option<String>,
    pub secondary_thumbprint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetric_key: Option<SymmetricKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x509_thumbprint: Option<X509Thumbprint>,
}

/// Body of `PUT /devices/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBody {
    pub device_id: String,
    pub status: String,
    pub authentication: Authentication,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

impl From<&DeviceCreate> for DeviceBody {
    fn from(request: &DeviceCreate) -> Self {
        let authentication = match request.auth_method {
            AuthMethod::Sas => Authentication {
                auth_type: Some("sas".into()),
                symmetric_key: Some(SymmetricKey {
                    primary_key: non_empty(&request.primary_key),
                    secondary_key: non_empty(&request.secondary_key),
                }),
                x509_thumbprint: None,
            },
            AuthMethod::X509 => Authentication {
                auth_type: Some("selfSigned".into()),
                symmetric_key: None,
                x509_thumbprint: Some(X509Thumbprint {
                    primary_thumbprint: non_empty(&request.primary_key),
                    secondary_thumbprint: non_empty(&request.secondary_key),
                }),
            },
        };

        Self {
            device_id: request.device_id.clone(),
            status: "enabled".into(),
            authentication,
        }
    }
}

/// Device identity as returned by the registry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisteredDevice {
    pub device_id: Option<String>,
    pub generation_id: Option<String>,
    pub etag: Option<String>,
    pub connection_state: Option<String>,
    pub status: Option<String>,
    pub status_reason: Option<String>,
    pub connection_state_updated_time: Option<String>,
    pub status_updated_time: Option<String>,
    pub last_activity_time: Option<String>,
    pub cloud_to_device_message_count: Option<u64>,
    pub authentication: Option<Authentication>,
}

impl RegisteredDevice {
    pub fn primary_key(&self) -> Option<&str> {
        self.authentication
            .as_ref()
            .and_then(|a| a.symmetric_key.as_ref())
            .and_then(|k| k.primary_key.as_deref())
    }
}
