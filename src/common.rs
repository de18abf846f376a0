pub use std::{str::FromStr, sync::Arc};

pub use anchor_client::{
    solana_sdk::{
        commitment_config::CommitmentConfig,
        native_token::LAMPORTS_PER_SOL,
        pubkey::Pubkey,
        signature::{Keypair, Signature, Signer},
        system_instruction, system_program, sysvar,
        transaction::Transaction,
    },
    Client, Program,
};
pub use anchor_lang::AccountDeserialize;
pub use anyhow::{anyhow, Result};
pub use reqwest::Client as HttpClient;
pub use serde_json::{json, Value};
pub use tracing::{debug, error, info, warn};

pub use mpl_candy_machine::CandyMachine;

pub use crate::{
    constants::*,
    errors::*,
    setup::{bonbon_setup, setup_client},
};
