use crate::config::MAX_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_socket_addr, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cep-lookup")]
#[command(about = "HTTP service that resolves Brazilian postal codes (CEP) into addresses")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub bind: String,

    #[arg(long, default_value = "https://viacep.com.br/ws")]
    pub viacep_base_url: String,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Reject lookups whose state abbreviation is not a known UF")]
    pub strict_uf: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Load settings from a TOML file instead of the flags above")]
    pub config: Option<String>,
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn viacep_base_url(&self) -> &str {
        &self.viacep_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn strict_uf(&self) -> bool {
        self.strict_uf
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("bind", &self.bind)?;
        validate_url("viacep_base_url", &self.viacep_base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}
