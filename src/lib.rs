pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::ViaCepClient;
pub use app::{router, serve, AppState};
pub use crate::core::lookup::{CepLookupService, UfPolicy};
pub use crate::core::normalizer::normalize;
pub use domain::model::{Address, Cep, Uf, ViaCepResponse};
pub use domain::ports::{CepProvider, ConfigProvider};
pub use utils::error::{CepError, Result};
