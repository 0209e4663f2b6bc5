use tracing::{error, info, warn};

use crate::cache::TokenCache;
use crate::config::settings::AccountConfig;
use crate::credentials::{extract_field, HubCredential, SHARED_ACCESS_KEY_FIELD};
use crate::error::Result;
use crate::provisioning::{
    AuthMethod, DeviceProvisioner, ProvisionedDevice, UniqueIdGenerator, UuidGenerator, X509Credentials,
};
use crate::registry::{DeviceRegistry, HttpRegistryManager};
use crate::service::{MessagingClient, ServiceClientAuth};
use crate::signing::{HmacSasSigner, SasSigner};

/// Everything an end-to-end suite needs from one hub: the parsed credential,
/// a SAS device, an X509 device, a memoized service token and a messaging
/// handle.
///
/// Built by [`AccountInfo::init`], released by [`AccountInfo::deinit`]. A
/// context is meant for one owner at a time; threads that need credentials
/// concurrently should each build their own.
pub struct AccountInfo<R = HttpRegistryManager, G = UuidGenerator, S = HmacSasSigner> {
    config: AccountConfig,
    credential: HubCredential,
    token_cache: TokenCache,
    signer: S,
    ids: G,
    registry: R,
    messaging: MessagingClient,
    sas_device: Option<ProvisionedDevice>,
    x509_device: Option<ProvisionedDevice>,
}

impl AccountInfo {
    /// Initialize from the process environment against the live registry.
    pub async fn init_from_env() -> Result<Self> {
        Self::init(AccountConfig::from_env()?).await
    }

    pub async fn init(config: AccountConfig) -> Result<Self> {
        let credential = parse_credential(&config)?;
        let registry = HttpRegistryManager::new(ServiceClientAuth::new(credential.clone()))?;
        Self::init_parsed(config, credential, registry, UuidGenerator, HmacSasSigner).await
    }
}

impl<R, G, S> AccountInfo<R, G, S>
where
    R: DeviceRegistry,
    G: UniqueIdGenerator,
    S: SasSigner,
{
    /// Build a context with explicit collaborators.
    ///
    /// Provisions the SAS device, then the X509 device. Any failure deletes
    /// the devices created so far, closes the handles and returns the error.
    pub async fn init_with(config: AccountConfig, registry: R, ids: G, signer: S) -> Result<Self> {
        let credential = parse_credential(&config)?;
        Self::init_parsed(config, credential, registry, ids, signer).await
    }

    async fn init_parsed(
        config: AccountConfig,
        credential: HubCredential,
        registry: R,
        ids: G,
        signer: S,
    ) -> Result<Self> {
        let messaging = MessagingClient::new(ServiceClientAuth::new(credential.clone()));

        let mut account = Self {
            config,
            credential,
            token_cache: TokenCache::new(),
            signer,
            ids,
            registry,
            messaging,
            sas_device: None,
            x509_device: None,
        };

        for method in [AuthMethod::Sas, AuthMethod::X509] {
            match account.provision(method).await {
                Ok(device) => match method {
                    AuthMethod::Sas => account.sas_device = Some(device),
                    AuthMethod::X509 => account.x509_device = Some(device),
                },
                Err(e) => {
                    error!(auth_method = %method, error = %e, "Failed to create the {} device", method);
                    account.deinit().await;
                    return Err(e);
                }
            }
        }

        info!(hub = %account.credential.hub_name(), "account initialized");
        Ok(account)
    }

    async fn provision(&self, method: AuthMethod) -> Result<ProvisionedDevice> {
        let x509 = self.x509_credentials();
        DeviceProvisioner::new(&self.registry, &self.ids, self.credential.host_name(), method)
            .provision(&x509)
            .await
    }

    /// Delete the provisioned devices and close the messaging handle.
    ///
    /// Deletion failures are logged and never stop the teardown.
    pub async fn deinit(mut self) {
        for device in [self.sas_device.take(), self.x509_device.take()].into_iter().flatten() {
            DeviceProvisioner::new(&self.registry, &self.ids, self.credential.host_name(), device.auth_method)
                .deprovision(&device)
                .await;
        }
        self.messaging.close();
        info!(hub = %self.credential.hub_name(), "account released");
    }

    // ================================
    // Accessors
    // ================================

    pub fn eventhub_connection_string(&self) -> &str {
        &self.config.eventhub_connection_string
    }

    pub fn iothub_name(&self) -> &str {
        self.credential.hub_name()
    }

    pub fn iothub_suffix(&self) -> &str {
        self.credential.hub_suffix()
    }

    pub fn iothub_host_name(&self) -> &str {
        self.credential.host_name()
    }

    pub fn iothub_connection_string(&self) -> &str {
        &self.config.connection_string
    }

    /// Configured listen name, or the hub name when none is set.
    pub fn eventhub_listen_name(&self) -> String {
        self.config
            .eventhub_listen_name
            .clone()
            .unwrap_or_else(|| self.iothub_name().to_owned())
    }

    pub fn sas_device(&self) -> Option<&ProvisionedDevice> {
        self.sas_device.as_ref()
    }

    pub fn x509_device(&self) -> Option<&ProvisionedDevice> {
        self.x509_device.as_ref()
    }

    /// Service token for the hub, signed on first call and reused afterwards
    /// even past its expiry. `None` when signing fails.
    pub fn shared_access_signature(&mut self) -> Option<&str> {
        match self.token_cache.get_signed_token(&self.credential, &self.signer) {
            Ok(token) => Some(token.value.as_str()),
            Err(e) => {
                warn!(error = %e, "no shared access signature available");
                None
            }
        }
    }

    /// `SharedAccessKey` of the hub connection string, empty when absent.
    pub fn eventhub_access_key(&self) -> String {
        extract_field(&self.config.connection_string, SHARED_ACCESS_KEY_FIELD)
            .unwrap_or_default()
            .to_owned()
    }

    pub fn eventhub_consumer_group(&self) -> String {
        self.config.consumer_group()
    }

    pub fn partition_count(&self) -> usize {
        self.config.partition_count()
    }

    pub fn messaging_handle(&mut self) -> &mut MessagingClient {
        &mut self.messaging
    }

    fn x509_credentials(&self) -> X509Credentials {
        self.config.x509_credentials()
    }
}

fn parse_credential(config: &AccountConfig) -> Result<HubCredential> {
    config.validate()?;
    HubCredential::parse(&config.connection_string)
        .inspect_err(|e| error!(error = %e, "retrieving connection string info failed"))
}
