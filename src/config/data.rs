use std::{
    fmt::{self, Display},
    str::FromStr,
};

use anchor_client::solana_sdk::pubkey::Pubkey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::errors::ConfigError;

#[derive(Debug, Deserialize, Serialize)]
pub struct SolanaConfig {
    pub json_rpc_url: String,
    pub keypair_path: String,
    pub commitment: String,
}

/// Project configuration: which candy machine to mint from and where its
/// collection lives. Loaded from a camelCase JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
    pub env: Cluster,

    /// RPC endpoint; the command-line flag takes precedence over this value.
    #[serde(default)]
    pub rpc_url: Option<String>,

    #[serde(deserialize_with = "to_pubkey")]
    #[serde(serialize_with = "to_string")]
    pub candy_machine: Pubkey,

    /// Verified collection mint the minted NFTs belong to.
    #[serde(default)]
    #[serde(deserialize_with = "to_option_pubkey")]
    #[serde(serialize_with = "to_option_string")]
    pub collection_mint: Option<Pubkey>,

    /// Symbol fallback for the holdings lookup, for mints whose collection
    /// is not verified on-chain.
    #[serde(default)]
    pub symbol: Option<String>,

    /// Destination wallet for the `tip` command.
    #[serde(default)]
    #[serde(deserialize_with = "to_option_pubkey")]
    #[serde(serialize_with = "to_option_string")]
    pub tip_wallet: Option<Pubkey>,
}

pub fn to_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn to_option_string<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(&v),
        None => serializer.serialize_none(),
    }
}

fn to_pubkey<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(serde::de::Error::custom)
}

fn to_option_pubkey<'de, D>(deserializer: D) -> Result<Option<Pubkey>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = match Deserialize::deserialize(deserializer) {
        Ok(s) => s,
        Err(_) => return Ok(None),
    };

    let pubkey = Pubkey::from_str(&s).map_err(serde::de::Error::custom)?;
    Ok(Some(pubkey))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Devnet,
    Mainnet,
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "mainnet" => Ok(Cluster::Mainnet),
            _ => Err(ConfigError::InvalidCluster(s.to_string())),
        }
    }
}

impl Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cluster::Devnet => write!(f, "devnet"),
            Cluster::Mainnet => write!(f, "mainnet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_data_full() {
        let config: ConfigData = serde_json::from_str(
            r#"{
                "env": "devnet",
                "rpcUrl": "https://example.test/rpc",
                "candyMachine": "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ",
                "collectionMint": "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s",
                "symbol": "BNBN",
                "tipWallet": "11111111111111111111111111111111"
            }"#,
        )
        .unwrap();

        assert_eq!(config.env, Cluster::Devnet);
        assert_eq!(config.rpc_url.as_deref(), Some("https://example.test/rpc"));
        assert_eq!(config.symbol.as_deref(), Some("BNBN"));
        assert!(config.collection_mint.is_some());
        assert!(config.tip_wallet.is_some());
    }

    #[test]
    fn test_config_data_minimal() {
        let config: ConfigData = serde_json::from_str(
            r#"{
                "env": "mainnet",
                "candyMachine": "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ"
            }"#,
        )
        .unwrap();

        assert_eq!(config.env, Cluster::Mainnet);
        assert!(config.rpc_url.is_none());
        assert!(config.collection_mint.is_none());
        assert!(config.symbol.is_none());
        assert!(config.tip_wallet.is_none());
    }

    #[test]
    fn test_config_data_rejects_unknown_cluster() {
        let result = serde_json::from_str::<ConfigData>(
            r#"{
                "env": "testnet",
                "candyMachine": "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ"
            }"#,
        );
        assert!(result.is_err());
    }
}
