use crate::helpers::time::now_u64;

/// Lifetime handed to every freshly signed token.
pub const TOKEN_TTL_SECONDS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    pub value: String,
    pub exp_unix_ts: u64, // UNIX TIMESTAMP
}

impl SignedToken {
    pub fn new(value: String, exp_unix_ts: u64) -> Self {
        Self { value, exp_unix_ts }
    }

    pub fn is_expired(&self) -> bool {
        now_u64() >= self.exp_unix_ts
    }
}
