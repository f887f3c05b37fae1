use crate::core::normalizer::normalize;
use crate::domain::model::{Address, Cep, Uf, ViaCepResponse};
use crate::domain::ports::CepProvider;
use crate::utils::error::{CepError, Result};

/// What to do when the provider returns a state abbreviation outside the 27 known units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UfPolicy {
    /// Leave `uf` unset and log a warning.
    #[default]
    Lenient,
    /// Fail the lookup with `CepError::MappingError`.
    Strict,
}

impl UfPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            UfPolicy::Strict
        } else {
            UfPolicy::Lenient
        }
    }
}

pub struct CepLookupService<P: CepProvider> {
    provider: P,
    uf_policy: UfPolicy,
}

impl<P: CepProvider> CepLookupService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            uf_policy: UfPolicy::default(),
        }
    }

    pub fn with_uf_policy(mut self, uf_policy: UfPolicy) -> Self {
        self.uf_policy = uf_policy;
        self
    }

    pub fn uf_policy(&self) -> UfPolicy {
        self.uf_policy
    }

    /// Normalize `raw` and look it up. Invalid input never reaches the provider.
    pub async fn lookup_raw(&self, raw: Option<&str>) -> Result<Address> {
        let cep = normalize(raw)?;
        self.lookup(&cep).await
    }

    /// Single upstream attempt for an already-normalized code.
    pub async fn lookup(&self, cep: &Cep) -> Result<Address> {
        tracing::debug!(cep = %cep, "Looking up CEP");

        let response = match self.provider.fetch(cep).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                tracing::debug!(cep = %cep, "Upstream returned an empty payload");
                return Err(CepError::NotFound {
                    cep: cep.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(cep = %cep, error = %e, "Upstream lookup failed");
                return Err(e);
            }
        };

        if response.is_not_found() {
            tracing::debug!(cep = %cep, erro = response.erro, "Upstream reported CEP not found");
            return Err(CepError::NotFound {
                cep: cep.to_string(),
            });
        }

        self.map_address(cep, response)
    }

    fn map_address(&self, cep: &Cep, response: ViaCepResponse) -> Result<Address> {
        let uf = match response.uf.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<Uf>() {
                Ok(uf) => Some(uf),
                Err(unknown) => match self.uf_policy {
                    UfPolicy::Lenient => {
                        tracing::warn!(
                            cep = %cep,
                            uf = %unknown.0,
                            "Unrecognized state abbreviation, leaving uf unset"
                        );
                        None
                    }
                    UfPolicy::Strict => {
                        return Err(CepError::MappingError {
                            cep: cep.to_string(),
                            value: unknown.0,
                        })
                    }
                },
            },
        };

        Ok(Address {
            cep: response.cep,
            street: response.logradouro,
            complement: response.complemento,
            district: response.bairro,
            city: response.localidade,
            uf,
        })
    }
}
