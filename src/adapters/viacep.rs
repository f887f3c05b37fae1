use crate::domain::model::{Cep, ViaCepResponse};
use crate::domain::ports::CepProvider;
use crate::utils::error::{CepError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `CepProvider` backed by the public ViaCEP web service.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CepError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn lookup_url(&self, cep: &Cep) -> String {
        format!("{}/{}/json/", self.base_url, cep.as_str())
    }
}

#[async_trait]
impl CepProvider for ViaCepClient {
    async fn fetch(&self, cep: &Cep) -> Result<Option<ViaCepResponse>> {
        let url = self.lookup_url(cep);
        tracing::debug!("Making ViaCEP request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("ViaCEP response status: {}", status);

        if !status.is_success() {
            return Err(CepError::UpstreamUnavailable {
                message: format!("ViaCEP answered with HTTP {}", status),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<ViaCepResponse>>(&body).map_err(|e| {
            CepError::UpstreamUnavailable {
                message: format!("Malformed ViaCEP payload: {}", e),
            }
        })
    }
}
