use tracing::{debug, info};

use crate::error::Result;
use crate::service::auth::ServiceClientAuth;

/// Handle on the hub's service-side messaging endpoint.
///
/// Tests open it before sending cloud-to-device traffic; the account context
/// owns it and closes it on teardown.
#[derive(Debug)]
pub struct MessagingClient {
    auth: ServiceClientAuth,
    authorization: Option<String>,
}

impl MessagingClient {
    pub fn new(auth: ServiceClientAuth) -> Self {
        Self {
            auth,
            authorization: None,
        }
    }

    pub fn host_name(&self) -> &str {
        self.auth.host_name()
    }

    pub fn is_open(&self) -> bool {
        self.authorization.is_some()
    }

    /// Authorize the handle. Opening twice keeps the first authorization.
    pub fn open(&mut self) -> Result<()> {
        if self.authorization.is_none() {
            self.authorization = Some(self.auth.sas_token()?);
            info!(host = %self.host_name(), "messaging handle opened");
        }
        Ok(())
    }

    /// Authorization header value of an open handle.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    pub fn close(&mut self) {
        if self.authorization.take().is_some() {
            debug!(host = %self.host_name(), "messaging handle closed");
        }
    }
}
