use std::rc::Rc;

use anchor_client::{
    solana_sdk::{
        commitment_config::CommitmentConfig,
        signature::{read_keypair_file, Keypair},
    },
    Client, Cluster,
};
use anyhow::Result;

use crate::{
    config::data::ConfigData, constants::DEFAULT_RPC_DEVNET, errors::SetupError,
    parse::parse_solana_config,
};

pub struct BonbonConfig {
    pub keypair: Keypair,
    pub rpc_url: String,
}

pub fn setup_client(config: &BonbonConfig) -> Result<Client> {
    let rpc_url = config.rpc_url.clone();
    let ws_url = rpc_url.replace("http", "ws");
    let cluster = Cluster::Custom(rpc_url, ws_url);

    let key_bytes = config.keypair.to_bytes();
    let payer = Keypair::from_bytes(&key_bytes)?;

    let opts = CommitmentConfig::confirmed();
    Ok(Client::new_with_options(cluster, Rc::new(payer), opts))
}

pub fn bonbon_setup(keypair_opt: Option<String>, rpc_url: String) -> Result<BonbonConfig> {
    let sol_config = parse_solana_config();

    let keypair_path = match keypair_opt {
        Some(path) => path,
        None => match sol_config {
            Some(ref sol_config) => sol_config.keypair_path.clone(),
            None => shellexpand::tilde("~/.config/solana/id.json").to_string(),
        },
    };

    let keypair = read_keypair_file(&keypair_path)
        .map_err(|_| SetupError::KeypairNotFound(keypair_path.clone()))?;

    Ok(BonbonConfig { keypair, rpc_url })
}

/// Resolve the RPC url: command-line flag, then the config file, then the
/// Solana CLI config, then the devnet default.
pub fn get_rpc_url(rpc_url_opt: Option<String>, config_data: &ConfigData) -> String {
    if let Some(rpc_url) = rpc_url_opt {
        return rpc_url;
    }

    if let Some(rpc_url) = &config_data.rpc_url {
        return rpc_url.clone();
    }

    match parse_solana_config() {
        Some(sol_config) => sol_config.json_rpc_url,
        None => DEFAULT_RPC_DEVNET.to_string(),
    }
}
