use tracing::{error, info, warn};

use crate::credentials::build_device_connection_string;
use crate::error::{AccountError, Result};
use crate::observability::metrics::get_metrics;
use crate::provisioning::device::{AuthMethod, DeviceState, ProvisionedDevice, X509Credentials};
use crate::provisioning::id::{device_name_template, generate_device_name, UniqueIdGenerator};
use crate::registry::{DeviceCreate, DeviceRegistry};

/// Drives one test device through
/// `Unprovisioned -> NameGenerated -> Created -> ConnectionStringBuilt -> Deprovisioned`.
///
/// A device that reached `Created` but failed to get a connection string is
/// left in the registry; it is reported with its id and not deleted here.
pub struct DeviceProvisioner<'a, R, G: ?Sized> {
    registry: &'a R,
    ids: &'a G,
    host_name: &'a str,
    auth_method: AuthMethod,
    state: DeviceState,
}

impl<'a, R, G> DeviceProvisioner<'a, R, G>
where
    R: DeviceRegistry,
    G: UniqueIdGenerator + ?Sized,
{
    pub fn new(registry: &'a R, ids: &'a G, host_name: &'a str, auth_method: AuthMethod) -> Self {
        Self {
            registry,
            ids,
            host_name,
            auth_method,
            state: DeviceState::Unprovisioned,
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub async fn provision(&mut self, x509: &X509Credentials) -> Result<ProvisionedDevice> {
        let method = self.auth_method;

        let device_id = generate_device_name(device_name_template(method), self.ids)
            .map_err(|e| self.fail("name", format!("device name generation failed: {e}")))?;
        self.state = DeviceState::NameGenerated;

        let request = match method {
            AuthMethod::Sas => DeviceCreate::sas(&device_id),
            AuthMethod::X509 => DeviceCreate::x509_thumbprint(&device_id, &x509.thumbprint),
        };
        let registered = self
            .registry
            .create_device(&request)
            .await
            .map_err(|e| self.fail("create", format!("creating '{device_id}' failed: {e}")))?;
        self.state = DeviceState::Created;

        // copy what the device needs, the registry answer is dropped here
        let (primary_authentication, certificate) = match method {
            AuthMethod::Sas => (registered.primary_key().unwrap_or_default().to_owned(), None),
            AuthMethod::X509 => (x509.private_key.clone(), Some(x509.certificate.clone())),
        };

        let connection_string = build_device_connection_string(
            self.host_name,
            &device_id,
            method,
            &primary_authentication,
        )
        .map_err(|e| {
            warn!(
                device_id = %device_id,
                auth_method = %method,
                "device left in the registry without a connection string, delete it manually"
            );
            self.fail("connection_string", format!("building the connection string of '{device_id}' failed: {e}"))
        })?;
        self.state = DeviceState::ConnectionStringBuilt;

        get_metrics()
            .devices_provisioned
            .with_label_values(&[method.as_str()])
            .inc();
        info!(device_id = %device_id, auth_method = %method, "Created Device");

        Ok(ProvisionedDevice {
            device_id,
            auth_method: method,
            primary_authentication,
            connection_string,
            certificate,
        })
    }

    /// Delete `device` from the registry. Failures are logged and swallowed;
    /// the return value only reports whether the delete went through.
    pub async fn deprovision(&mut self, device: &ProvisionedDevice) -> bool {
        let deleted = match self.registry.delete_device(&device.device_id).await {
            Ok(()) => {
                info!(device_id = %device.device_id, auth_method = %device.auth_method, "Deleted Device");
                true
            }
            Err(e) => {
                get_metrics()
                    .teardown_failures
                    .with_label_values(&[device.auth_method.as_str()])
                    .inc();
                error!(
                    device_id = %device.device_id,
                    auth_method = %device.auth_method,
                    error = %e,
                    "deleting device failed"
                );
                false
            }
        };
        self.state = DeviceState::Deprovisioned;
        deleted
    }

    fn fail(&self, stage: &str, reason: String) -> AccountError {
        get_metrics()
            .provisioning_failures
            .with_label_values(&[self.auth_method.as_str(), stage])
            .inc();
        error!(
            auth_method = %self.auth_method,
            stage,
            state = self.state.as_str(),
            "{}",
            reason
        );
        AccountError::ProvisioningFailure(reason)
    }
}
