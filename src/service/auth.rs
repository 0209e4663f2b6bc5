use crate::cache::token::TOKEN_TTL_SECONDS;
use crate::credentials::HubCredential;
use crate::error::Result;
use crate::helpers::time::now_u64;
use crate::signing::{HmacSasSigner, SasSigner};

/// Service-level authentication shared by the registry and messaging handles.
#[derive(Debug, Clone)]
pub struct ServiceClientAuth {
    credential: HubCredential,
    signer: HmacSasSigner,
}

impl ServiceClientAuth {
    pub fn new(credential: HubCredential) -> Self {
        Self {
            credential,
            signer: HmacSasSigner,
        }
    }

    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        HubCredential::parse(connection_string).map(Self::new)
    }

    pub fn host_name(&self) -> &str {
        self.credential.host_name()
    }

    /// Sign a fresh hub-scoped token valid for one hour.
    pub fn sas_token(&self) -> Result<String> {
        self.signer.sign(
            self.credential.shared_key(),
            self.credential.host_name(),
            self.credential.key_name(),
            now_u64() + TOKEN_TTL_SECONDS,
        )
    }
}
