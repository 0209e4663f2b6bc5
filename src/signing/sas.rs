use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, error};

use crate::error::{AccountError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Produces `SharedAccessSignature` tokens.
pub trait SasSigner {
    /// Sign `scope` with the base64 `key` until `expiry` (unix seconds).
    fn sign(&self, key: &str, scope: &str, key_name: &str, expiry: u64) -> Result<String>;
}

/// HMAC-SHA256 signer matching the IoT Hub token format:
/// `SharedAccessSignature sr=<scope>&sig=<signature>&se=<expiry>&skn=<key name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSasSigner;

impl SasSigner for HmacSasSigner {
    fn sign(&self, key: &str, scope: &str, key_name: &str, expiry: u64) -> Result<String> {
        if scope.is_empty() || key_name.is_empty() {
            return Err(AccountError::SigningFailure(
                "scope and key name must not be empty".into(),
            ));
        }

        let decoded_key = STANDARD.decode(key).map_err(|e| {
            error!(error = %e, "shared access key is not valid base64");
            AccountError::SigningFailure(format!("invalid shared access key: {e}"))
        })?;

        let encoded_scope = urlencoding::encode(scope);
        let string_to_sign = format!("{encoded_scope}\n{expiry}");

        let mut mac = HmacSha256::new_from_slice(&decoded_key)
            .map_err(|e| AccountError::SigningFailure(format!("cannot create HMAC: {e}")))?;
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        debug!(scope = %scope, expiry, "shared access signature created");
        Ok(format!(
            "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
            encoded_scope,
            urlencoding::encode(&signature),
            expiry,
            key_name
        ))
    }
}
