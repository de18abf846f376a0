use chrono::{NaiveDateTime, Utc};
use console::style;
use solana_client::rpc_client::RpcClient;

use crate::{candy_machine::*, common::*, config::get_config_data, setup::get_rpc_url, utils::*};

pub struct ShowArgs {
    pub keypair: Option<String>,
    pub rpc_url: Option<String>,
    pub config: String,
    pub candy_machine: Option<String>,
}

pub fn process_show(args: ShowArgs) -> Result<()> {
    println!(
        "{} {}Looking up candy machine",
        style("[1/1]").bold().dim(),
        LOOKING_GLASS_EMOJI
    );

    let pb = spinner_with_style();
    pb.set_message("Connecting...");

    let config_data = get_config_data(&args.config)?;
    let rpc_url = get_rpc_url(args.rpc_url, &config_data);

    // A candy machine specified on the command line takes precedence over
    // the one in the config file.
    let candy_machine_id = match args.candy_machine {
        Some(candy_machine) => Pubkey::from_str(&candy_machine)
            .map_err(|_| anyhow!("Failed to parse candy machine id: {}", candy_machine))?,
        None => config_data.candy_machine,
    };

    let bonbon_config = bonbon_setup(args.keypair, rpc_url.clone())?;

    let rpc_client = RpcClient::new(&rpc_url);
    match get_cluster(&rpc_client) {
        Ok(cluster) if cluster != config_data.env => {
            pb.println(format!(
                "{}Config file says '{}' but the RPC endpoint is on '{}'",
                WARNING_EMOJI, config_data.env, cluster
            ));
        }
        Ok(_) => (),
        Err(err) => warn!("Could not determine cluster: {}", err),
    }

    let cndy_state = get_candy_machine_state(&bonbon_config, &candy_machine_id)?;
    let cndy_data = cndy_state.data;

    pb.finish_and_clear();

    println!(
        "\n{}{} {}",
        CANDY_EMOJI,
        style("Candy machine ID:").dim(),
        &candy_machine_id
    );

    println!(" {}", style(":").dim());
    print_with_style("", "authority", cndy_state.authority.to_string());
    print_with_style("", "wallet", cndy_state.wallet.to_string());
    print_with_style("", "items redeemed", cndy_state.items_redeemed.to_string());
    print_with_style("", "items available", cndy_data.items_available.to_string());
    print_with_style(
        "",
        "items remaining",
        cndy_data
            .items_available
            .saturating_sub(cndy_state.items_redeemed)
            .to_string(),
    );
    print_with_style(
        "",
        "price",
        format!(
            "◎ {} ({})",
            cndy_data.price as f64 / LAMPORTS_PER_SOL as f64,
            cndy_data.price
        ),
    );
    print_with_style("", "symbol", cndy_data.symbol.trim_matches(char::from(0)).to_string());

    let now = Utc::now().timestamp();
    if let Some(date) = cndy_data.go_live_date {
        let formatted = NaiveDateTime::from_timestamp(date, 0)
            .format("%a %B %e %Y %H:%M:%S UTC")
            .to_string();
        print_with_style("", "go live date", formatted);
        print_with_style("", "live", (date <= now).to_string());
    } else {
        print_with_style("", "go live date", "none".to_string());
    }

    print_with_style("", "creators", "".to_string());
    for (index, creator) in cndy_data.creators.into_iter().enumerate() {
        let info = format!(
            "{} ({}%{})",
            creator.address,
            creator.share,
            if creator.verified { ", verified" } else { "" },
        );
        print_with_style(":   ", &(index + 1).to_string(), info);
    }

    Ok(())
}

fn print_with_style(indent: &str, key: &str, value: String) {
    println!(
        " {} {}",
        style(format!("{}:.. {}:", indent, key)).dim(),
        value
    );
}
