use console::style;

use crate::{
    common::*,
    config::get_config_data,
    reveal::{fetch::rpc_resolver, resolver::MintMetadata},
    setup::get_rpc_url,
    utils::*,
};

pub struct RevealArgs {
    pub mint: String,
    pub rpc_url: Option<String>,
    pub config: String,
    pub attempts: Option<u8>,
}

pub async fn process_reveal(args: RevealArgs) -> Result<()> {
    println!(
        "{} {}Loading mint account",
        style("[1/2]").bold().dim(),
        LOOKING_GLASS_EMOJI
    );

    let config_data = get_config_data(&args.config)?;
    let rpc_url = get_rpc_url(args.rpc_url, &config_data);

    let mint_pubkey = Pubkey::from_str(&args.mint)
        .map_err(|_| anyhow!("Failed to parse mint address: {}", args.mint))?;

    println!(
        "\n{} {}Resolving metadata",
        style("[2/2]").bold().dim(),
        GIFT_EMOJI
    );

    let attempts = args.attempts.unwrap_or(METADATA_RETRY_ATTEMPTS);
    let resolver = rpc_resolver(&rpc_url);

    let pb = spinner_with_style();
    pb.set_message("Waiting for off-chain metadata...");

    let metadata = resolver.resolve_with_retry(&mint_pubkey, attempts).await?;
    pb.finish_and_clear();

    if !metadata.is_revealed() {
        println!(
            "\n{}Metadata is not fully indexed yet. Run the command again in a moment.",
            WARNING_EMOJI
        );
    }

    print_mint_metadata(&metadata);

    println!(
        "\nSee it on solscan: {}",
        style(solscan_token_link(&config_data.env, &args.mint))
            .blue()
            .underlined()
    );

    Ok(())
}

/// Shared display block for resolved metadata, used after a mint and by the
/// reveal command.
pub fn print_mint_metadata(metadata: &MintMetadata) {
    println!("\n{} {}", style("Name:").bold(), metadata.name);

    if let Some(image_url) = &metadata.image_url {
        println!("{} {}", style("Image:").bold(), image_url);
    }

    if let Some(animation_url) = &metadata.animation_url {
        println!("{} {}", style("Animation:").bold(), animation_url);
    }

    if !metadata.traits.is_empty() {
        println!("{}", style("Traits:").bold());
        for t in &metadata.traits {
            println!("  {}: {}", style(&t.trait_type).dim(), t.value);
        }
    }
}
