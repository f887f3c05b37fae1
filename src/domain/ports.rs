use crate::domain::model::{Cep, ViaCepResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn viacep_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn strict_uf(&self) -> bool;
    fn json_logs(&self) -> bool;
}

/// Upstream postal-lookup capability.
///
/// `Ok(None)` means the provider answered but with an empty payload.
/// Transport and decoding failures surface as `CepError::UpstreamUnavailable`.
#[async_trait]
pub trait CepProvider: Send + Sync {
    async fn fetch(&self, cep: &Cep) -> Result<Option<ViaCepResponse>>;
}

#[async_trait]
impl<P: CepProvider + ?Sized> CepProvider for std::sync::Arc<P> {
    async fn fetch(&self, cep: &Cep) -> Result<Option<ViaCepResponse>> {
        (**self).fetch(cep).await
    }
}
