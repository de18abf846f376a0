use clap::{AppSettings, Parser, Subcommand};

use crate::constants::DEFAULT_CONFIG;

#[derive(Parser)]
#[clap(author, version, about)]
#[clap(global_setting(AppSettings::SubcommandRequiredElseHelp))]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error, off
    #[clap(short, long, global = true)]
    pub log_level: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the state of the configured candy machine
    Show {
        /// Path to the keypair file, uses Solana CLI config if not specified
        #[clap(short, long)]
        keypair: Option<String>,

        /// RPC endpoint url to override using the Solana config or the config file
        #[clap(short, long)]
        rpc_url: Option<String>,

        /// Path to the config file
        #[clap(short, long, default_value = DEFAULT_CONFIG)]
        config: String,

        /// Address of candy machine to show, defaults to the one in the config file
        candy_machine: Option<String>,
    },
    /// Mint one or more NFTs from the candy machine
    Mint {
        /// Path to the keypair file, uses Solana CLI config if not specified
        #[clap(short, long)]
        keypair: Option<String>,

        /// RPC endpoint url to override using the Solana config or the config file
        #[clap(short, long)]
        rpc_url: Option<String>,

        /// Path to the config file
        #[clap(short, long, default_value = DEFAULT_CONFIG)]
        config: String,

        /// Amount of NFTs to be minted in bulk
        #[clap(short, long)]
        number: Option<u64>,

        /// Address of candy machine to mint from, defaults to the one in the config file
        candy_machine: Option<String>,
    },
    /// Resolve and display the metadata of a minted NFT
    Reveal {
        /// Address of the NFT mint
        mint: String,

        /// RPC endpoint url to override using the Solana config or the config file
        #[clap(short, long)]
        rpc_url: Option<String>,

        /// Path to the config file
        #[clap(short, long, default_value = DEFAULT_CONFIG)]
        config: String,

        /// Number of resolution attempts before giving up
        #[clap(short, long)]
        attempts: Option<u8>,
    },
    /// List collection NFTs held by a wallet
    Holdings {
        /// Address of the wallet to inspect
        wallet: String,

        /// RPC endpoint url to override using the Solana config or the config file
        #[clap(short, long)]
        rpc_url: Option<String>,

        /// Path to the config file
        #[clap(short, long, default_value = DEFAULT_CONFIG)]
        config: String,
    },
    /// Send a SOL tip to the project wallet
    Tip {
        /// Amount in SOL
        amount: f64,

        /// Path to the keypair file, uses Solana CLI config if not specified
        #[clap(short, long)]
        keypair: Option<String>,

        /// RPC endpoint url to override using the Solana config or the config file
        #[clap(short, long)]
        rpc_url: Option<String>,

        /// Path to the config file
        #[clap(short, long, default_value = DEFAULT_CONFIG)]
        config: String,
    },
}
