#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::error::AccountError;
    use crate::registry::headers::{JSON_CONTENT_TYPE, REGISTRY_USER_AGENT};
    use crate::registry::{DeviceCreate, DeviceRegistry, HttpRegistryManager};
    use crate::service::ServiceClientAuth;
    use crate::tests::common::CONNECTION_STRING;

    fn manager(server: &MockServer) -> HttpRegistryManager {
        let auth = ServiceClientAuth::from_connection_string(CONNECTION_STRING).unwrap();
        HttpRegistryManager::new(auth).unwrap().with_base_url(server.base_url())
    }

    #[test]
    fn default_base_url_targets_the_hub() {
        let auth = ServiceClientAuth::from_connection_string(CONNECTION_STRING).unwrap();
        let manager = HttpRegistryManager::new(auth).unwrap();
        assert_eq!(manager.base_url(), "https://myhub.azure-devices.net");
    }

    #[tokio::test]
    async fn create_device_puts_the_sas_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/devices/e2e-sas")
                    .query_param("api-version", "2016-11-14")
                    .header("content-type", JSON_CONTENT_TYPE)
                    .header("user-agent", REGISTRY_USER_AGENT)
                    .header_exists("authorization")
                    .json_body(json!({
                        "deviceId": "e2e-sas",
                        "status": "enabled",
                        "authentication": {
                            "type": "sas",
                            "symmetricKey": {"primaryKey": null, "secondaryKey": null}
                        }
                    }));
                then.status(200).json_body(json!({
                    "deviceId": "e2e-sas",
                    "generationId": "637",
                    "etag": "MA==",
                    "status": "enabled",
                    "authentication": {
                        "type": "sas",
                        "symmetricKey": {"primaryKey": "cHJpbWFyeQ==", "secondaryKey": "c2Vjb25kYXJ5"}
                    }
                }));
            })
            .await;

        let device = manager(&server)
            .create_device(&DeviceCreate::sas("e2e-sas"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(device.primary_key(), Some("cHJpbWFyeQ=="));
        assert_eq!(device.device_id.as_deref(), Some("e2e-sas"));
    }

    #[tokio::test]
    async fn create_device_sends_the_thumbprint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT).path("/devices/e2e-x509").json_body(json!({
                    "deviceId": "e2e-x509",
                    "status": "enabled",
                    "authentication": {
                        "type": "selfSigned",
                        "x509Thumbprint": {"primaryThumbprint": "ABCD", "secondaryThumbprint": null}
                    }
                }));
                then.status(200).json_body(json!({"deviceId": "e2e-x509"}));
            })
            .await;

        let device = manager(&server)
            .create_device(&DeviceCreate::x509_thumbprint("e2e-x509", "ABCD"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(device.primary_key(), None);
    }

    #[tokio::test]
    async fn rejected_create_is_a_provisioning_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/devices/e2e-sas");
                then.status(500).body("boom");
            })
            .await;

        let err = manager(&server)
            .create_device(&DeviceCreate::sas("e2e-sas"))
            .await
            .unwrap_err();

        match err {
            AccountError::ProvisioningFailure(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_answer_is_a_provisioning_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/devices/e2e-sas");
                then.status(200).body("not json");
            })
            .await;

        let err = manager(&server)
            .create_device(&DeviceCreate::sas("e2e-sas"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::ProvisioningFailure(_)));
    }

    #[tokio::test]
    async fn delete_device_is_unconditional() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/devices/e2e-sas")
                    .query_param("api-version", "2016-11-14")
                    .header("if-match", "*")
                    .header_exists("authorization");
                then.status(204);
            })
            .await;

        manager(&server).delete_device("e2e-sas").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_delete_is_a_teardown_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/devices/gone");
                then.status(404);
            })
            .await;

        let err = manager(&server).delete_device("gone").await.unwrap_err();
        assert!(matches!(err, AccountError::TeardownFailure(_)));
    }
}
