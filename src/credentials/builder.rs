use crate::error::{AccountError, Result};
use crate::provisioning::device::AuthMethod;

const CONN_HOST_PART: &str = "HostName=";
const CONN_DEVICE_PART: &str = ";DeviceId=";
const CONN_KEY_PART: &str = ";SharedAccessKey=";
const CONN_X509_PART: &str = ";x509=true";

/// Build the device-scoped connection string for `device_id` on `host_name`.
///
/// SAS devices produce `HostName=..;DeviceId=..;SharedAccessKey=<primary_authentication>`,
/// X509 devices `HostName=..;DeviceId=..;x509=true` (the key is not embedded).
/// The exact length is reserved once before any part is written.
pub fn build_device_connection_string(
    host_name: &str,
    device_id: &str,
    auth_method: AuthMethod,
    primary_authentication: &str,
) -> Result<String> {
    if host_name.is_empty() {
        return Err(AccountError::FormatFailure("empty host name".into()));
    }
    if device_id.is_empty() {
        return Err(AccountError::FormatFailure("empty device id".into()));
    }

    let parts: [&str; 6] = match auth_method {
        AuthMethod::Sas => {
            if primary_authentication.is_empty() {
                return Err(AccountError::FormatFailure(format!(
                    "device '{device_id}' has no primary key"
                )));
            }
            [CONN_HOST_PART, host_name, CONN_DEVICE_PART, device_id, CONN_KEY_PART, primary_authentication]
        }
        AuthMethod::X509 => [CONN_HOST_PART, host_name, CONN_DEVICE_PART, device_id, CONN_X509_PART, ""],
    };

    let expected_len: usize = parts.iter().map(|p| p.len()).sum();

    let mut connection_string = String::new();
    connection_string
        .try_reserve_exact(expected_len)
        .map_err(|e| {
            AccountError::AllocationFailure(format!(
                "cannot reserve {expected_len} bytes for the {auth_method} connection string: {e}"
            ))
        })?;

    for part in parts {
        connection_string.push_str(part);
    }

    if connection_string.len() != expected_len {
        return Err(AccountError::FormatFailure(format!(
            "{auth_method} connection string has {} bytes, expected {expected_len}",
            connection_string.len()
        )));
    }

    Ok(connection_string)
}
