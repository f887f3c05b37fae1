pub mod lookup;
pub mod normalizer;

pub use crate::domain::model::{Address, Cep, Uf, ViaCepResponse};
pub use crate::domain::ports::{CepProvider, ConfigProvider};
pub use crate::utils::error::Result;
