use console::style;
use dialoguer::Confirm;
use solana_client::rpc_client::RpcClient;

use crate::{common::*, config::get_config_data, setup::get_rpc_url, utils::*};

pub struct TipArgs {
    pub amount: f64,
    pub keypair: Option<String>,
    pub rpc_url: Option<String>,
    pub config: String,
}

pub fn process_tip(args: TipArgs) -> Result<()> {
    let config_data = get_config_data(&args.config)?;
    let rpc_url = get_rpc_url(args.rpc_url, &config_data);

    let tip_wallet = config_data
        .tip_wallet
        .ok_or_else(|| anyhow!("No 'tipWallet' address in the config file"))?;

    let lamports = tip_lamports(args.amount)?;

    let bonbon_config = bonbon_setup(args.keypair, rpc_url.clone())?;
    let payer = bonbon_config.keypair.pubkey();

    println!(
        "{} {}Sending tip",
        style("[1/1]").bold().dim(),
        MONEY_EMOJI
    );

    let theme = get_dialoguer_theme();
    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(format!(
            "Send ◎ {} from {} to {}?",
            args.amount, payer, tip_wallet
        ))
        .interact()?;

    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let rpc_client = RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed());

    let pb = spinner_with_style();
    pb.set_message("Sending transaction...");

    let transfer_ix = system_instruction::transfer(&payer, &tip_wallet, lamports);
    let blockhash = rpc_client.get_latest_blockhash()?;
    let transaction = Transaction::new_signed_with_payer(
        &[transfer_ix],
        Some(&payer),
        &[&bonbon_config.keypair],
        blockhash,
    );

    let signature = rpc_client.send_and_confirm_transaction(&transaction)?;
    pb.finish_and_clear();

    info!("Tip of {} lamports sent in transaction {}", lamports, signature);

    println!(
        "\n{}{} {}",
        CONFETTI_EMOJI,
        style("Thank you! Signature:").bold(),
        signature
    );
    println!(
        "See it on solscan: {}",
        style(solscan_tx_link(&config_data.env, &signature.to_string()))
            .blue()
            .underlined()
    );

    Ok(())
}

/// Convert a SOL amount into lamports, rejecting non-positive values and
/// amounts above the safety cap.
fn tip_lamports(amount: f64) -> Result<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(anyhow!("Tip amount must be greater than zero"));
    }

    if amount > MAX_TIP_SOL {
        return Err(anyhow!(
            "Tip amount is capped at {} SOL, got {}",
            MAX_TIP_SOL,
            amount
        ));
    }

    Ok((amount * LAMPORTS_PER_SOL as f64).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_lamports_rounds_to_nearest() {
        assert_eq!(tip_lamports(1.0).unwrap(), LAMPORTS_PER_SOL);
        assert_eq!(tip_lamports(0.1).unwrap(), 100_000_000);
        // avoids the truncation artifacts of a plain cast
        assert_eq!(tip_lamports(0.29).unwrap(), 290_000_000);
    }

    #[test]
    fn test_tip_lamports_rejects_invalid_amounts() {
        assert!(tip_lamports(0.0).is_err());
        assert!(tip_lamports(-1.0).is_err());
        assert!(tip_lamports(f64::NAN).is_err());
        assert!(tip_lamports(MAX_TIP_SOL + 0.01).is_err());
    }

    #[test]
    fn test_tip_lamports_accepts_the_cap() {
        assert_eq!(
            tip_lamports(MAX_TIP_SOL).unwrap(),
            (MAX_TIP_SOL as u64) * LAMPORTS_PER_SOL
        );
    }
}
