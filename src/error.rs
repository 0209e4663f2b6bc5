use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Failures raised while building or tearing down an account context.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    #[error("format failure: {0}")]
    FormatFailure(String),

    #[error("signing failure: {0}")]
    SigningFailure(String),

    #[error("provisioning failure: {0}")]
    ProvisioningFailure(String),

    /// Only ever logged; teardown never returns it to the caller.
    #[error("teardown failure: {0}")]
    TeardownFailure(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}
