use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use identity_check::{
    config::{CrossCoreApiConfig, SigningKeyConfig},
    factory::ServiceFactory,
    interrupt::Interrupt,
    signer::{HmacSigner, Signer},
};

/// Run CrossCore identity checks from the command line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Config file (JSON, TOML or YAML). CROSSCORE_API_* environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a person identity JSON file and send it to the provider
    Check {
        /// Person identity JSON
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the hmac-signature header value for a request body file.
    ///
    /// Only hmac_key (or CROSSCORE_API_HMAC_KEY) is needed.
    Sign {
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { input } => {
            let body = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let config = CrossCoreApiConfig::load(cli.config.as_deref())?;
            let handler = ServiceFactory::handler_from_config(&config)?;

            let interrupt = Interrupt::new();
            let on_ctrl_c = interrupt.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::info!("Interrupt received, abandoning identity check");
                    on_ctrl_c.interrupt();
                }
            });

            let response = handler.handle(&body, &interrupt).await;

            println!("{}", response.status_code);
            println!("{}", response.body);
        }
        Command::Sign { input } => {
            let body = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let config = SigningKeyConfig::load(cli.config.as_deref())?;
            let signer = HmacSigner::new(&config.hmac_key)?;

            println!("{}", signer.sign_payload(Some(&body))?);
        }
    }

    Ok(())
}
