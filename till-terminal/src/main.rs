//! Till - sale terminal for the inventory backend
//!
//! ## Configuration
//!
//! Flags take precedence over environment variables, which take precedence
//! over the JSON config file:
//!
//! - `TILL_BASE_URL` - backend URL (default: `https://inventoryonline.onrender.com`)
//! - `TILL_TOKEN` - bearer token, instead of the stored credential
//! - `TILL_CONFIG` - config file (default: `till.json`)
//! - `TILL_LOG_DIR` - log directory (default: `<data dir>/logs`)
//!
//! A `.env` file in the working directory is loaded first.

mod cli;
mod commands;
mod config;
mod logging;
mod sell;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use till_client::{Credential, CredentialStorage};

use cli::{Cli, Command};
use config::{CREDENTIAL_FILE, TerminalConfig};

/// Token from the flag/env, else the credential stored by `till login`
fn resolve_credential(cli: &Cli, storage: &CredentialStorage) -> Result<Credential> {
    if let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(Credential::new(token));
    }
    storage
        .load()
        .ok_or_else(|| anyhow!("Not logged in. Run `till login --email <EMAIL>` first"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.apply(
        TerminalConfig::load(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?,
    );

    let _log_guard = logging::init(&cli.log_dir(&config)).context("Failed to initialize logging")?;
    tracing::info!(base_url = %config.base_url, "Till starting");

    let client = config.client_config().build_client()?;
    let storage = CredentialStorage::new(&config.data_dir, CREDENTIAL_FILE);

    let command = cli.command.as_ref().unwrap_or(&Command::Sell);
    match command {
        Command::Login { email, password } => {
            return commands::login(&client, &storage, email, password).await;
        }
        Command::Logout => return commands::logout(&storage),
        Command::SaveConfig => {
            config
                .save(&cli.config)
                .with_context(|| format!("Failed to write {}", cli.config.display()))?;
            println!("Config written to {}", cli.config.display());
            return Ok(());
        }
        _ => {}
    }

    let credential = resolve_credential(&cli, &storage)?;
    match command {
        Command::Sell => sell::run(client, credential).await,
        Command::Overview => commands::overview(&client, &credential).await,
        Command::LowStock { threshold } => {
            commands::low_stock(&client, &credential, *threshold).await
        }
        Command::Sales(args) => commands::sales(&client, &credential, args).await,
        Command::DeleteSale { id } => commands::delete_sale(&client, &credential, id).await,
        Command::Report(args) => commands::report(&client, &credential, args).await,
        Command::Product(product) => commands::product(&client, &credential, product).await,
        Command::Login { .. } | Command::Logout | Command::SaveConfig => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Drop a token picked up from `TILL_TOKEN` in the test environment
    fn without_token(mut cli: Cli) -> Cli {
        cli.token = None;
        cli
    }

    #[test]
    fn test_flag_token_wins_over_storage() {
        let dir = TempDir::new().unwrap();
        let storage = CredentialStorage::new(dir.path(), CREDENTIAL_FILE);
        storage.save(&Credential::new("stored")).unwrap();

        let cli = Cli::parse_from(["till", "--token", "flag", "overview"]);
        assert_eq!(resolve_credential(&cli, &storage).unwrap().token, "flag");
    }

    #[test]
    fn test_stored_credential_is_used() {
        let dir = TempDir::new().unwrap();
        let storage = CredentialStorage::new(dir.path(), CREDENTIAL_FILE);
        storage.save(&Credential::new("stored")).unwrap();

        let cli = without_token(Cli::parse_from(["till", "overview"]));
        assert_eq!(resolve_credential(&cli, &storage).unwrap().token, "stored");
    }

    #[test]
    fn test_missing_credential_is_error() {
        let dir = TempDir::new().unwrap();
        let storage = CredentialStorage::new(dir.path(), CREDENTIAL_FILE);
        let cli = without_token(Cli::parse_from(["till", "overview"]));
        assert!(resolve_credential(&cli, &storage).is_err());
    }
}
