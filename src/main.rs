use std::{fs::OpenOptions, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use bonbon::{
    cli::{Cli, Commands},
    constants::{COMPLETE_EMOJI, ERROR_EMOJI},
    holdings::{process_holdings, HoldingsArgs},
    mint::{process_mint, MintArgs},
    parse::parse_rpc_errors,
    reveal::{process_reveal, RevealArgs},
    show::{process_show, ShowArgs},
    tip::{process_tip, TipArgs},
};
use clap::Parser;
use console::style;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{self, filter::LevelFilter, prelude::*, EnvFilter};

fn setup_logging(level: Option<EnvFilter>) -> Result<()> {
    // Log in the current directory for now.
    let log_path = PathBuf::from("bonbon.log");

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(&log_path)?;

    // A user-provided level takes priority, then RUST_LOG, then "info".
    let env_filter = if let Some(filter) = level {
        filter
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let formatting_layer = BunyanFormattingLayer::new("bonbon".into(), file);
    let level_filter = LevelFilter::from_str(&env_filter.to_string())?;

    let subscriber = tracing_subscriber::registry()
        .with(formatting_layer.with_filter(level_filter))
        .with(JsonStorageLayer);

    set_global_default(subscriber).expect("Failed to set global default subscriber");

    Ok(())
}

#[tokio::main(worker_threads = 4)]
async fn main() {
    match run().await {
        Ok(()) => {
            println!(
                "\n{}{}",
                COMPLETE_EMOJI,
                style("Command successful.").green().bold().dim()
            );
        }
        Err(err) => {
            let parsed_err = parse_rpc_errors(&err.to_string());

            println!(
                "\n{}{} {}",
                ERROR_EMOJI,
                style("Error running command (re-run needed):").red(),
                parsed_err,
            );
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    solana_logger::setup_with_default("solana=off");

    let cli = Cli::parse();

    if let Some(user_filter) = cli.log_level {
        let filter = EnvFilter::from_str(&user_filter).map_err(|_| {
            anyhow!(
                "Invalid log level: {:?}.\n Valid levels are: trace, debug, info, warn, error.",
                user_filter
            )
        })?;
        setup_logging(Some(filter))?;
    } else {
        setup_logging(None)?;
    }

    tracing::info!("Sweet! Bonbon is running.");

    match cli.command {
        Commands::Show {
            keypair,
            rpc_url,
            config,
            candy_machine,
        } => process_show(ShowArgs {
            keypair,
            rpc_url,
            config,
            candy_machine,
        })?,
        Commands::Mint {
            keypair,
            rpc_url,
            config,
            number,
            candy_machine,
        } => {
            process_mint(MintArgs {
                keypair,
                rpc_url,
                config,
                number,
                candy_machine,
            })
            .await?
        }
        Commands::Reveal {
            mint,
            rpc_url,
            config,
            attempts,
        } => {
            process_reveal(RevealArgs {
                mint,
                rpc_url,
                config,
                attempts,
            })
            .await?
        }
        Commands::Holdings {
            wallet,
            rpc_url,
            config,
        } => {
            process_holdings(HoldingsArgs {
                wallet,
                rpc_url,
                config,
            })
            .await?
        }
        Commands::Tip {
            amount,
            keypair,
            rpc_url,
            config,
        } => process_tip(TipArgs {
            amount,
            keypair,
            rpc_url,
            config,
        })?,
    }

    Ok(())
}
