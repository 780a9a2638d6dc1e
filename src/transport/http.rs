//! HTTP transport: JSON POST to a configured endpoint.

use async_trait::async_trait;
use reqwest::header::HeaderName;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::TransportConfig;
use crate::form::FormPayload;
use crate::transport::{Transport, TransportError};

/// Posts the payload as JSON. The session token rides in a header as well as
/// in the body so a backend can check either.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    token_header: HeaderName,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }

        let token_header = HeaderName::from_bytes(config.token_header.as_bytes())
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", config.token_header, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token_header,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, payload: &FormPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(self.token_header.clone(), payload.csrf_token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(self.timeout_secs)
                } else {
                    TransportError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, endpoint = %self.endpoint, "Contact endpoint rejected submission");
            return Err(TransportError::Status(status.as_u16()));
        }

        tracing::debug!(status = %status, "Contact endpoint accepted submission");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_config() {
        let mut config = TransportConfig {
            endpoint: "ftp://example.com/contact".to_string(),
            ..TransportConfig::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::InvalidEndpoint(_))
        ));

        config.endpoint = "https://example.com/contact".to_string();
        config.token_header = "bad header".to_string();
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::InvalidHeader(_))
        ));

        config.token_header = "X-CSRF-Token".to_string();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.endpoint().as_str(), "https://example.com/contact");
    }
}
