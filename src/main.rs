use cep_lookup::utils::{logger, validation::Validate};
use cep_lookup::{router, serve, AppState, CliConfig, ConfigProvider, TomlConfig};
use clap::Parser;
use tokio::net::TcpListener;

fn load_config(cli: &CliConfig) -> cep_lookup::Result<Box<dyn ConfigProvider>> {
    match &cli.config {
        Some(path) => {
            let toml = TomlConfig::from_file(path)?;
            toml.validate()?;
            Ok(Box::new(toml))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // the logger format comes from config, so config errors go straight to stderr
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Configuration failed ({}): {}",
                e.category().as_str(),
                e.user_friendly_message()
            );
            std::process::exit(1);
        }
    };

    logger::init_logger(cli.verbose, cli.json_logs || config.json_logs());

    tracing::info!("Starting cep-lookup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }
    tracing::info!(
        "Upstream: {} (timeout {:?}, strict uf: {})",
        config.viacep_base_url(),
        config.request_timeout(),
        config.strict_uf()
    );

    let state = AppState::from_config(config.as_ref())?;
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve(listener, router(state)).await?;

    Ok(())
}
