use async_trait::async_trait;
use mpl_token_metadata::{
    pda::find_metadata_account,
    state::{Metadata, TokenMetadataAccount},
};
use solana_client::rpc_client::RpcClient;

use crate::{
    common::*,
    reveal::resolver::{AssetReader, DocumentFetcher, MetadataResolver, OnChainAsset},
};

/// Reads the token metadata account of a mint over RPC.
pub struct RpcAssetReader {
    client: Arc<RpcClient>,
}

impl RpcAssetReader {
    pub fn new(client: Arc<RpcClient>) -> Self {
        RpcAssetReader { client }
    }
}

#[async_trait]
impl AssetReader for RpcAssetReader {
    async fn read(&self, asset: &Pubkey) -> Result<OnChainAsset> {
        let (metadata_pubkey, _) = find_metadata_account(asset);
        let data = self.client.get_account_data(&metadata_pubkey)?;
        let metadata = Metadata::safe_deserialize(data.as_slice())?;

        // On-chain strings are fixed-size and zero padded.
        Ok(OnChainAsset {
            document_uri: metadata.data.uri.trim_matches(char::from(0)).to_string(),
            fallback_name: metadata.data.name.trim_matches(char::from(0)).to_string(),
        })
    }
}

pub struct HttpDocumentFetcher {
    client: HttpClient,
}

impl HttpDocumentFetcher {
    pub fn new() -> Self {
        HttpDocumentFetcher {
            client: HttpClient::new(),
        }
    }
}

impl Default for HttpDocumentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn get_json(&self, uri: &str) -> Result<Value> {
        let response = self.client.get(uri).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Unexpected status {} from {}", response.status(), uri));
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Resolver wired to live RPC and HTTP backends.
pub fn rpc_resolver(rpc_url: &str) -> MetadataResolver<RpcAssetReader, HttpDocumentFetcher> {
    let client = Arc::new(RpcClient::new_with_commitment(
        rpc_url.to_string(),
        CommitmentConfig::confirmed(),
    ));
    MetadataResolver::new(RpcAssetReader::new(client), HttpDocumentFetcher::new())
}
