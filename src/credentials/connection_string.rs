use crate::error::{AccountError, Result};

const HOST_NAME_PREFIX: &str = "HostName=";
const KEY_NAME_PREFIX: &str = ";SharedAccessKeyName=";
const KEY_PREFIX: &str = ";SharedAccessKey=";

/// Parsed service-level credential of the hub under test.
///
/// Invariant: `host_name == hub_name + "." + hub_suffix`.
#[derive(Clone, PartialEq, Eq)]
pub struct HubCredential {
    host_name: String,
    hub_name: String,
    hub_suffix: String,
    key_name: String,
    shared_key: String,
}

impl HubCredential {
    /// Decompose `HostName=<hub>.<suffix>;SharedAccessKeyName=<name>;SharedAccessKey=<key>`.
    ///
    /// Fields must appear in exactly that order. Only the first `.` of the host
    /// separates hub name from suffix, so `a.b.c` yields hub `a` and suffix `b.c`.
    /// The key may carry base64 padding and runs up to the first whitespace.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let rest = connection_string
            .strip_prefix(HOST_NAME_PREFIX)
            .ok_or_else(|| malformed("missing HostName field"))?;

        let host_end = rest
            .find(';')
            .ok_or_else(|| malformed("HostName is not terminated by ';'"))?;
        let (host_name, rest) = rest.split_at(host_end);

        let (hub_name, hub_suffix) = host_name
            .split_once('.')
            .ok_or_else(|| malformed("HostName has no '.' separating hub name and suffix"))?;
        if hub_name.is_empty() {
            return Err(malformed("empty hub name"));
        }
        if hub_suffix.is_empty() {
            return Err(malformed("empty hub suffix"));
        }

        let rest = rest
            .strip_prefix(KEY_NAME_PREFIX)
            .ok_or_else(|| malformed("missing SharedAccessKeyName field"))?;
        let key_name_end = rest
            .find(';')
            .ok_or_else(|| malformed("SharedAccessKeyName is not terminated by ';'"))?;
        let (key_name, rest) = rest.split_at(key_name_end);
        if key_name.is_empty() {
            return Err(malformed("empty SharedAccessKeyName"));
        }

        let rest = rest
            .strip_prefix(KEY_PREFIX)
            .ok_or_else(|| malformed("missing SharedAccessKey field"))?;
        let shared_key = rest.split_whitespace().next().unwrap_or_default();
        if shared_key.is_empty() {
            return Err(malformed("empty SharedAccessKey"));
        }

        Ok(Self {
            host_name: host_name.to_owned(),
            hub_name: hub_name.to_owned(),
            hub_suffix: hub_suffix.to_owned(),
            key_name: key_name.to_owned(),
            shared_key: shared_key.to_owned(),
        })
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn hub_name(&self) -> &str {
        &self.hub_name
    }

    pub fn hub_suffix(&self) -> &str {
        &self.hub_suffix
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn shared_key(&self) -> &str {
        &self.shared_key
    }
}

// keeps the shared key out of logs
impl std::fmt::Debug for HubCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubCredential")
            .field("host_name", &self.host_name)
            .field("hub_name", &self.hub_name)
            .field("hub_suffix", &self.hub_suffix)
            .field("key_name", &self.key_name)
            .field("shared_key", &"***")
            .finish()
    }
}

fn malformed(reason: &str) -> AccountError {
    AccountError::MalformedCredential(reason.to_owned())
}
