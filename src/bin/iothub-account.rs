use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iothub_account::config::{load_config, AccountConfig};
use iothub_account::credentials::HubCredential;
use iothub_account::observability::metrics::get_metrics;
use iothub_account::service::ServiceClientAuth;
use iothub_account::utils::logging::{self, LogLevel};
use iothub_account::AccountInfo;
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config; the environment is read when omitted
    #[arg(short, long, env = "IOTHUB_ACCOUNT_CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Print prometheus metrics before exiting
    #[arg(long)]
    metrics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parts of the hub connection string
    Parse,
    /// Print a service SAS token valid for one hour
    SasToken,
    /// Provision the SAS and X509 test devices and print their connection strings
    Provision {
        /// Leave the devices in the registry instead of deleting them
        #[arg(long)]
        keep: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load config
    // -------------------------------

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {path}"))?,
        None => AccountConfig::from_env().context("reading the environment")?,
    };
    logging::run(config.logging.as_ref(), args.log_level);

    // -------------------------------
    // 2. Run command
    // -------------------------------

    match args.command {
        Command::Parse => {
            let credential = HubCredential::parse(&config.connection_string)?;
            let parts = json!({
                "host_name": credential.host_name(),
                "hub_name": credential.hub_name(),
                "hub_suffix": credential.hub_suffix(),
                "key_name": credential.key_name(),
            });
            println!("{}", serde_json::to_string_pretty(&parts)?);
        }
        Command::SasToken => {
            let auth = ServiceClientAuth::from_connection_string(&config.connection_string)?;
            println!("{}", auth.sas_token()?);
        }
        Command::Provision { keep } => {
            let account = AccountInfo::init(config).await?;
            let devices = json!({
                "hub_name": account.iothub_name(),
                "sas_device": account.sas_device(),
                "x509_device": account.x509_device(),
            });
            println!("{}", serde_json::to_string_pretty(&devices)?);

            if keep {
                info!("keeping provisioned devices");
            } else {
                account.deinit().await;
            }
        }
    }

    // -------------------------------
    // 3. Metrics
    // -------------------------------

    if args.metrics {
        print!("{}", get_metrics().gather_text()?);
    }

    Ok(())
}
