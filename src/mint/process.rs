use console::style;
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::{
    instruction::{initialize_mint, mint_to},
    ID as TOKEN_PROGRAM_ID,
};

use mpl_candy_machine::{accounts as nft_accounts, instruction as nft_instruction};

use crate::{
    candy_machine::*,
    common::*,
    config::get_config_data,
    pdas::*,
    reveal::{print_mint_metadata, rpc_resolver},
    setup::get_rpc_url,
    utils::*,
};

pub struct MintArgs {
    pub keypair: Option<String>,
    pub rpc_url: Option<String>,
    pub config: String,
    pub number: Option<u64>,
    pub candy_machine: Option<String>,
}

pub async fn process_mint(args: MintArgs) -> Result<()> {
    let config_data = get_config_data(&args.config)?;
    let rpc_url = get_rpc_url(args.rpc_url, &config_data);
    let bonbon_config = bonbon_setup(args.keypair, rpc_url)?;

    let candy_machine_id = match args.candy_machine {
        Some(candy_machine) => Pubkey::from_str(&candy_machine)
            .map_err(|_| anyhow!("Failed to parse candy machine id: {}", candy_machine))?,
        None => config_data.candy_machine,
    };

    println!(
        "{} {}Minting from candy machine",
        style("[1/2]").bold().dim(),
        CANDY_EMOJI
    );
    println!("Candy machine ID: {}", &candy_machine_id);

    let candy_machine_state = get_candy_machine_state(&bonbon_config, &candy_machine_id)?;
    let number = args.number.unwrap_or(1);
    let available = items_remaining(&candy_machine_state);

    if number > available || number == 0 {
        let error = anyhow!("{} item(s) available, requested {}", available, number);
        error!("{:?}", error);
        return Err(error);
    }

    // Additional remaining accounts for these settings are not wired up, so
    // bail out with a useful message instead of a program error.
    if candy_machine_state.data.gatekeeper.is_some() {
        return Err(anyhow!(
            "This candy machine requires a gatekeeper challenge, which is not supported"
        ));
    }
    if candy_machine_state.data.whitelist_mint_settings.is_some() {
        return Err(anyhow!(
            "This candy machine uses a whitelist token, which is not supported"
        ));
    }
    if candy_machine_state.token_mint.is_some() {
        return Err(anyhow!(
            "This candy machine takes payment in an SPL token; only SOL payments are supported"
        ));
    }

    info!("Minting NFT from candy machine: {}", &candy_machine_id);
    info!("Candy machine program id: {:?}", CANDY_MACHINE_ID);

    if number == 1 {
        let pb = spinner_with_style();
        pb.set_message(format!("{} item(s) remaining", available));

        let (signature, nft_mint) =
            mint(&bonbon_config, candy_machine_id, &candy_machine_state)?;

        pb.finish_with_message(format!("{} {}", style("Signature:").bold(), signature));
        println!("{} {}", style("Mint:").bold(), nft_mint);

        println!(
            "\n{} {}Resolving metadata",
            style("[2/2]").bold().dim(),
            GIFT_EMOJI
        );

        let pb = spinner_with_style();
        pb.set_message("Waiting for off-chain metadata...");

        // The mint is confirmed at this point. A metadata lookup failure is
        // reported as a warning, never as a mint failure.
        let resolver = rpc_resolver(&bonbon_config.rpc_url);
        match resolver
            .resolve_with_retry(&nft_mint, METADATA_RETRY_ATTEMPTS)
            .await
        {
            Ok(metadata) => {
                pb.finish_and_clear();
                print_mint_metadata(&metadata);
            }
            Err(err) => {
                pb.finish_and_clear();
                warn!("{:?}", err);
                println!(
                    "\n{}Mint succeeded, but the metadata is not available yet. \
                    Run 'bonbon reveal {}' to try again.",
                    WARNING_EMOJI, nft_mint
                );
            }
        }

        println!(
            "\nSee it on solscan: {}",
            style(solscan_token_link(&config_data.env, &nft_mint.to_string()))
                .blue()
                .underlined()
        );
    } else {
        let pb = indicatif::ProgressBar::new(number);

        for _ in 0..number {
            match mint(&bonbon_config, candy_machine_id, &candy_machine_state) {
                Ok((signature, nft_mint)) => {
                    info!("Minted {} in transaction {}", nft_mint, signature);
                }
                Err(err) => {
                    error!("{:?}", err);
                }
            }
            pb.inc(1);
        }
        pb.finish();
    }

    println!("\n{}", style("[Completed]").bold().dim());

    Ok(())
}

pub fn mint(
    bonbon_config: &crate::setup::BonbonConfig,
    candy_machine_id: Pubkey,
    candy_machine_state: &CandyMachine,
) -> Result<(Signature, Pubkey)> {
    let client = setup_client(bonbon_config)?;
    let program = client.program(CANDY_MACHINE_ID);
    let payer = program.payer();
    let wallet = candy_machine_state.wallet;

    let nft_mint = Keypair::new();

    let min_rent = program
        .rpc()
        .get_minimum_balance_for_rent_exemption(MINT_LAYOUT as usize)?;

    let create_mint_account_ix = system_instruction::create_account(
        &payer,
        &nft_mint.pubkey(),
        min_rent,
        MINT_LAYOUT,
        &TOKEN_PROGRAM_ID,
    );

    let init_mint_ix = initialize_mint(
        &TOKEN_PROGRAM_ID,
        &nft_mint.pubkey(),
        &payer,
        Some(&payer),
        0,
    )?;

    let assoc = get_associated_token_address(&payer, &nft_mint.pubkey());

    let create_assoc_account_ix =
        create_associated_token_account(&payer, &payer, &nft_mint.pubkey(), &TOKEN_PROGRAM_ID);

    let mint_to_ix = mint_to(
        &TOKEN_PROGRAM_ID,
        &nft_mint.pubkey(),
        &assoc,
        &payer,
        &[],
        1,
    )?;

    let metadata_pda = find_metadata_pda(&nft_mint.pubkey());
    let master_edition_pda = find_master_edition_pda(&nft_mint.pubkey());
    let (candy_machine_creator_pda, creator_bump) =
        find_candy_machine_creator_pda(&candy_machine_id);

    let signature = program
        .request()
        .instruction(create_mint_account_ix)
        .instruction(init_mint_ix)
        .instruction(create_assoc_account_ix)
        .instruction(mint_to_ix)
        .signer(&nft_mint)
        .accounts(nft_accounts::MintNFT {
            candy_machine: candy_machine_id,
            candy_machine_creator: candy_machine_creator_pda,
            payer,
            wallet,
            metadata: metadata_pda,
            mint: nft_mint.pubkey(),
            mint_authority: payer,
            update_authority: payer,
            master_edition: master_edition_pda,
            token_metadata_program: mpl_token_metadata::ID,
            token_program: TOKEN_PROGRAM_ID,
            system_program: system_program::id(),
            rent: sysvar::rent::ID,
            clock: sysvar::clock::ID,
            recent_blockhashes: sysvar::recent_blockhashes::ID,
            instruction_sysvar_account: sysvar::instructions::ID,
        })
        .args(nft_instruction::MintNft { creator_bump })
        .send()?;

    info!("Minted! TxId: {}", signature);

    Ok((signature, nft_mint.pubkey()))
}
