use uuid::Uuid;

use crate::error::{AccountError, Result};
use crate::provisioning::device::AuthMethod;

pub const SAS_DEVICE_PREFIX_FMT: &str = "rs_e2eDevice_sas_please_delete_%s";
pub const X509_DEVICE_PREFIX_FMT: &str = "rs_e2eDevice_x509_please_delete_%s";

/// Source of globally unique identifiers for device names.
pub trait UniqueIdGenerator {
    fn generate(&self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UniqueIdGenerator for UuidGenerator {
    fn generate(&self) -> Result<String> {
        Ok(Uuid::new_v4().hyphenated().to_string())
    }
}

pub fn device_name_template(auth_method: AuthMethod) -> &'static str {
    match auth_method {
        AuthMethod::Sas => SAS_DEVICE_PREFIX_FMT,
        AuthMethod::X509 => X509_DEVICE_PREFIX_FMT,
    }
}

/// Substitute a fresh unique id for the `%s` placeholder of `template`.
pub fn generate_device_name<G>(template: &str, ids: &G) -> Result<String>
where
    G: UniqueIdGenerator + ?Sized,
{
    if !template.contains("%s") {
        return Err(AccountError::FormatFailure(format!(
            "device name template '{template}' has no %s placeholder"
        )));
    }
    let unique_id = ids.generate()?;
    if unique_id.is_empty() {
        return Err(AccountError::FormatFailure("unique id generator returned an empty id".into()));
    }
    Ok(template.replacen("%s", &unique_id, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedId(&'static str);

    impl UniqueIdGenerator for FixedId {
        fn generate(&self) -> Result<String> {
            Ok(self.0.to_owned())
        }
    }

    #[test]
    fn substitutes_placeholder() {
        let name = generate_device_name(SAS_DEVICE_PREFIX_FMT, &FixedId("1234")).unwrap();
        assert_eq!(name, "rs_e2eDevice_sas_please_delete_1234");
    }

    #[test]
    fn uuid_names_are_unique() {
        let a = generate_device_name(X509_DEVICE_PREFIX_FMT, &UuidGenerator).unwrap();
        let b = generate_device_name(X509_DEVICE_PREFIX_FMT, &UuidGenerator).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("rs_e2eDevice_x509_please_delete_"));
        assert_eq!(a.len(), X509_DEVICE_PREFIX_FMT.len() - 2 + 36);
    }

    #[test]
    fn rejects_template_without_placeholder() {
        assert!(generate_device_name("no-placeholder", &UuidGenerator).is_err());
        assert!(generate_device_name(SAS_DEVICE_PREFIX_FMT, &FixedId("")).is_err());
    }
}
