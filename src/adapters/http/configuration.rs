//! Configuration generator backed by the export service's HTTP API
//!
//! `POST <configuration_url>` with `{"format": "<format>"}` returns the
//! attempt's [`SaveConfiguration`] as JSON.

use super::client::{build_client, connection_error, request_failed};
use crate::adapters::traits::ConfigurationGenerator;
use crate::config::{SecretString, ServiceConfig};
use crate::domain::ids::FormatName;
use crate::domain::{ExportError, Result, SaveConfiguration, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;

/// HTTP configuration generator
pub struct HttpConfigurationGenerator {
    client: Client,
    endpoint: String,
    api_token: Option<SecretString>,
}

impl HttpConfigurationGenerator {
    /// Create a generator from the `[service]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::with_client(
            build_client(config)?,
            config.configuration_url.clone(),
            config.api_token.clone(),
        ))
    }

    /// Create a generator around an existing client
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_token: Option<SecretString>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_token,
        }
    }

    /// Configuration endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ConfigurationGenerator for HttpConfigurationGenerator {
    async fn generate_export_configuration(
        &self,
        format: &FormatName,
    ) -> Result<SaveConfiguration> {
        tracing::debug!(endpoint = %self.endpoint, format = %format, "Requesting export configuration");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "format": format.as_str() }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(connection_error)?;
        if !response.status().is_success() {
            let error = request_failed(response).await;
            tracing::error!(format = %format, error = %error, "Export configuration request failed");
            return Err(error);
        }

        response.json::<SaveConfiguration>().await.map_err(|e| {
            ExportError::Transport(TransportError::InvalidResponse(format!(
                "Malformed save configuration: {e}"
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[tokio::test]
    async fn test_generate_configuration() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/export-config")
            .match_header("authorization", "Bearer t0ken")
            .match_body(mockito::Matcher::Json(serde_json::json!({"format": "pdf"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"signedErrorListUrl":"errorlisturl","signedOutputListUrl":"outputlisturl",
                    "signedOutputUrl":"outputurl","jobId":"AIUHDKUHGDKHUD"}"#,
            )
            .create_async()
            .await;

        let generator = HttpConfigurationGenerator::with_client(
            Client::new(),
            format!("{}/export-config", server.url()),
            Some(secret_string("t0ken".to_string())),
        );
        let config = generator
            .generate_export_configuration(&FormatName::new("pdf").unwrap())
            .await
            .unwrap();

        assert_eq!(config.job_id.as_str(), "AIUHDKUHGDKHUD");
        assert_eq!(config.signed_output_url, "outputurl");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_configuration_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/export-config")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let generator = HttpConfigurationGenerator::with_client(
            Client::new(),
            format!("{}/export-config", server.url()),
            None,
        );
        let err = generator
            .generate_export_configuration(&FormatName::new("pdf").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::Transport(TransportError::RequestFailed { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_configuration_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/export-config")
            .with_status(200)
            .with_body(r#"{"jobId": "x"}"#)
            .create_async()
            .await;

        let generator = HttpConfigurationGenerator::with_client(
            Client::new(),
            format!("{}/export-config", server.url()),
            None,
        );
        let err = generator
            .generate_export_configuration(&FormatName::new("pdf").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::Transport(TransportError::InvalidResponse(_))
        ));
    }
}
