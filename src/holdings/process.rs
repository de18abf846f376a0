use console::style;
use mpl_token_metadata::{
    pda::find_metadata_account,
    state::{Metadata, TokenMetadataAccount},
};
use solana_account_decoder::UiAccountData;
use solana_client::{rpc_client::RpcClient, rpc_request::TokenAccountsFilter};

use crate::{
    common::*,
    config::get_config_data,
    reveal::{print_mint_metadata, rpc_resolver},
    setup::get_rpc_url,
    utils::*,
};

pub struct HoldingsArgs {
    pub wallet: String,
    pub rpc_url: Option<String>,
    pub config: String,
}

pub async fn process_holdings(args: HoldingsArgs) -> Result<()> {
    let config_data = get_config_data(&args.config)?;
    let rpc_url = get_rpc_url(args.rpc_url, &config_data);

    let owner = Pubkey::from_str(&args.wallet)
        .map_err(|_| anyhow!("Failed to parse wallet address: {}", args.wallet))?;

    if config_data.collection_mint.is_none() && config_data.symbol.is_none() {
        return Err(anyhow!(
            "Set 'collectionMint' or 'symbol' in the config file to identify collection items"
        ));
    }

    println!(
        "{} {}Loading token accounts",
        style("[1/2]").bold().dim(),
        WALLET_EMOJI
    );

    let pb = spinner_with_style();
    pb.set_message("Connecting...");

    let rpc_client = RpcClient::new_with_commitment(rpc_url.clone(), CommitmentConfig::confirmed());
    let token_accounts = rpc_client
        .get_token_accounts_by_owner(&owner, TokenAccountsFilter::ProgramId(spl_token::id()))?;

    // NFTs hold exactly one token with zero decimals; everything else in the
    // wallet is skipped before any metadata lookup.
    let candidates: Vec<Pubkey> = token_accounts
        .iter()
        .filter_map(|keyed| match &keyed.account.data {
            UiAccountData::Json(parsed) => token_candidate_mint(&parsed.parsed),
            _ => None,
        })
        .collect();

    pb.finish_and_clear();
    info!(
        "Wallet {} has {} token account(s), {} NFT candidate(s)",
        owner,
        token_accounts.len(),
        candidates.len()
    );

    println!(
        "\n{} {}Inspecting metadata",
        style("[2/2]").bold().dim(),
        LOOKING_GLASS_EMOJI
    );

    let pb = spinner_with_style();
    pb.set_message(format!("Checking {} candidate(s)...", candidates.len()));

    let mut matched: Vec<Pubkey> = Vec::new();

    for mint in candidates {
        let (metadata_pubkey, _) = find_metadata_account(&mint);
        let data = match rpc_client.get_account_data(&metadata_pubkey) {
            Ok(data) => data,
            Err(_) => continue,
        };
        let metadata = match Metadata::safe_deserialize(data.as_slice()) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("Skipping {}: could not read metadata ({})", mint, err);
                continue;
            }
        };

        let collection = metadata.collection.map(|c| (c.key, c.verified));
        let symbol = metadata.data.symbol.trim_matches(char::from(0)).to_string();

        if matches_collection(
            collection,
            &symbol,
            config_data.collection_mint.as_ref(),
            config_data.symbol.as_deref(),
        ) {
            matched.push(mint);
        }
    }

    pb.finish_and_clear();

    if matched.is_empty() {
        println!("\nNo collection items found in this wallet.");
        return Ok(());
    }

    println!(
        "\nFound {} collection item(s):",
        style(matched.len()).bold()
    );

    let resolver = rpc_resolver(&rpc_url);

    for mint in &matched {
        match resolver.fetch_once(mint).await {
            Ok(metadata) => {
                print_mint_metadata(&metadata);
                println!(
                    "{} {}",
                    style("Solscan:").bold(),
                    solscan_token_link(&config_data.env, &mint.to_string())
                );
            }
            Err(err) => {
                warn!("Could not resolve metadata for {}: {}", mint, err);
                println!("\n{} {}", style("Mint:").bold(), mint);
            }
        }
    }

    Ok(())
}

/// Mint address of a parsed token account that looks like an NFT: amount of
/// at least one, zero decimals.
fn token_candidate_mint(parsed: &Value) -> Option<Pubkey> {
    let info = parsed.get("info")?;
    let token_amount = info.get("tokenAmount")?;

    let decimals = token_amount.get("decimals")?.as_u64()?;
    if decimals != 0 {
        return None;
    }

    let amount: u64 = token_amount.get("amount")?.as_str()?.parse().ok()?;
    if amount < 1 {
        return None;
    }

    Pubkey::from_str(info.get("mint")?.as_str()?).ok()
}

/// A mint belongs to the collection when its verified on-chain collection
/// matches the configured mint; the symbol comparison is a fallback for
/// collections that were never verified.
fn matches_collection(
    collection: Option<(Pubkey, bool)>,
    symbol: &str,
    wanted_collection: Option<&Pubkey>,
    wanted_symbol: Option<&str>,
) -> bool {
    if let Some(wanted) = wanted_collection {
        if let Some((key, verified)) = collection {
            if verified && key == *wanted {
                return true;
            }
        }
    }

    if let Some(wanted) = wanted_symbol {
        if !wanted.is_empty() && symbol == wanted {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed_account(mint: &Pubkey, amount: &str, decimals: u64) -> Value {
        json!({
            "info": {
                "mint": mint.to_string(),
                "tokenAmount": { "amount": amount, "decimals": decimals }
            },
            "type": "account"
        })
    }

    #[test]
    fn test_token_candidate_accepts_single_nft() {
        let mint = Pubkey::new_unique();
        let candidate = token_candidate_mint(&parsed_account(&mint, "1", 0));
        assert_eq!(candidate, Some(mint));
    }

    #[test]
    fn test_token_candidate_rejects_fungible_and_empty_accounts() {
        let mint = Pubkey::new_unique();
        // fungible token, non-zero decimals
        assert!(token_candidate_mint(&parsed_account(&mint, "1000", 6)).is_none());
        // emptied token account left behind after a transfer
        assert!(token_candidate_mint(&parsed_account(&mint, "0", 0)).is_none());
        // malformed account data
        assert!(token_candidate_mint(&json!({ "info": {} })).is_none());
    }

    #[test]
    fn test_matches_collection_requires_verified_key() {
        let wanted = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        assert!(matches_collection(
            Some((wanted, true)),
            "BNBN",
            Some(&wanted),
            None
        ));
        assert!(!matches_collection(
            Some((wanted, false)),
            "BNBN",
            Some(&wanted),
            None
        ));
        assert!(!matches_collection(
            Some((other, true)),
            "BNBN",
            Some(&wanted),
            None
        ));
    }

    #[test]
    fn test_matches_collection_symbol_fallback() {
        let wanted = Pubkey::new_unique();

        // no on-chain collection, symbol matches
        assert!(matches_collection(None, "BNBN", Some(&wanted), Some("BNBN")));
        assert!(!matches_collection(None, "OTHER", Some(&wanted), Some("BNBN")));
        // empty configured symbol never matches
        assert!(!matches_collection(None, "", None, Some("")));
    }
}
