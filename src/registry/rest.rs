use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use tracing::{debug, error};

use crate::error::{AccountError, Result};
use crate::observability::metrics::get_metrics;
use crate::registry::headers::content_headers;
use crate::registry::models::{DeviceBody, DeviceCreate, RegisteredDevice};
use crate::registry::DeviceRegistry;
use crate::service::auth::ServiceClientAuth;

pub const URL_API_VERSION: &str = "api-version=2016-11-14";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Registry manager backed by the hub's `/devices` REST resource.
#[derive(Debug, Clone)]
pub struct HttpRegistryManager {
    auth: ServiceClientAuth,
    base_url: String,
    client: Client,
}

impl HttpRegistryManager {
    pub fn new(auth: ServiceClientAuth) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AccountError::Configuration(format!("cannot build HTTP client: {e}")))?;
        let base_url = format!("https://{}", auth.host_name());

        Ok(Self { auth, base_url, client })
    }

    /// Point the manager at another endpoint, e.g. a local mock of the registry.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn device_url(&self, device_id: &str) -> String {
        format!(
            "{}/devices/{}?{}",
            self.base_url,
            urlencoding::encode(device_id),
            URL_API_VERSION
        )
    }

    fn authorization(&self) -> std::result::Result<String, String> {
        self.auth
            .sas_token()
            .map_err(|e| format!("cannot authorize registry request: {e}"))
    }
}

impl DeviceRegistry for HttpRegistryManager {
    async fn create_device(&self, request: &DeviceCreate) -> Result<RegisteredDevice> {
        let authorization = self.authorization().map_err(AccountError::ProvisioningFailure)?;
        let headers = content_headers(&authorization, false)?;
        let body = serde_json::to_string(&DeviceBody::from(request))
            .map_err(|e| AccountError::FormatFailure(format!("cannot encode device body: {e}")))?;

        let started = Instant::now();
        let response = self
            .client
            .put(self.device_url(&request.device_id))
            .headers(headers)
            .body(body)
            .send()
            .await;
        observe("create_device", started);

        let response = check_status(response, "create", &request.device_id)
            .await
            .map_err(AccountError::ProvisioningFailure)?;

        let device = response.json::<RegisteredDevice>().await.map_err(|e| {
            AccountError::ProvisioningFailure(format!(
                "cannot decode registry answer for '{}': {e}",
                request.device_id
            ))
        })?;
        debug!(device_id = %request.device_id, "registry created device");
        Ok(device)
    }

    async fn delete_device(&self, device_id: &str) -> Result<()> {
        let authorization = self.authorization().map_err(AccountError::TeardownFailure)?;
        let headers = content_headers(&authorization, true)?;

        let started = Instant::now();
        let response = self
            .client
            .delete(self.device_url(device_id))
            .headers(headers)
            .send()
            .await;
        observe("delete_device", started);

        check_status(response, "delete", device_id)
            .await
            .map_err(AccountError::TeardownFailure)?;
        debug!(device_id = %device_id, "registry deleted device");
        Ok(())
    }
}

fn observe(operation: &str, started: Instant) {
    get_metrics()
        .registry_request_duration
        .with_label_values(&[operation])
        .observe(started.elapsed().as_secs_f64());
}

async fn check_status(
    response: reqwest::Result<Response>,
    operation: &str,
    device_id: &str,
) -> std::result::Result<Response, String> {
    let response = response.map_err(|e| {
        error!(device_id = %device_id, error = %e, "registry {} request failed", operation);
        format!("{operation} request for '{device_id}' failed: {e}")
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!(device_id = %device_id, status = %status, "registry {} rejected", operation);
    Err(format!("{operation} of '{device_id}' answered {status}: {body}"))
}
