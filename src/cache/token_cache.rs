use tracing::{debug, error, warn};

use crate::cache::token::{SignedToken, TOKEN_TTL_SECONDS};
use crate::credentials::HubCredential;
use crate::error::Result;
use crate::helpers::time::now_u64;
use crate::observability::metrics::get_metrics;
use crate::signing::SasSigner;

/// Memoizes the service-level SAS token of one account context.
///
/// The token is signed on first use and then handed out unchanged for the
/// life of the cache, expired or not. Callers needing a fresh token must build
/// a new context. Not synchronized: one owner, `&mut` access.
#[derive(Debug, Default)]
pub struct TokenCache {
    token: Option<SignedToken>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self { token: None }
    }

    /// Return the cached token, signing one with `signer` if none exists yet.
    ///
    /// On failure nothing is cached and the next call signs again.
    pub fn get_signed_token<S>(&mut self, credential: &HubCredential, signer: &S) -> Result<&SignedToken>
    where
        S: SasSigner + ?Sized,
    {
        let token = match self.token {
            Some(ref token) => token,
            None => {
                let expiry = now_u64() + TOKEN_TTL_SECONDS;
                let value = signer
                    .sign(credential.shared_key(), credential.host_name(), credential.key_name(), expiry)
                    .inspect_err(|e| error!(host = %credential.host_name(), error = %e, "signing shared access token failed"))?;

                get_metrics().sas_tokens_signed.inc();
                debug!(host = %credential.host_name(), expires_at = expiry, "shared access token cached");
                &*self.token.insert(SignedToken::new(value, expiry))
            }
        };

        if token.is_expired() {
            warn!(expired_at = token.exp_unix_ts, "handing out an expired shared access token");
        }
        Ok(token)
    }
}
