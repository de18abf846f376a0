pub use mpl_candy_machine::ID as CANDY_MACHINE_ID;

use crate::{common::*, setup::BonbonConfig};

pub fn get_candy_machine_state(
    bonbon_config: &BonbonConfig,
    candy_machine_id: &Pubkey,
) -> Result<CandyMachine> {
    let client = setup_client(bonbon_config)?;
    let program = client.program(CANDY_MACHINE_ID);

    program.account(*candy_machine_id).map_err(|_| {
        anyhow!(
            "Could not find candy machine with address: {}. Check that the configured \
            address and RPC cluster are correct.",
            candy_machine_id
        )
    })
}

pub fn items_remaining(candy_machine: &CandyMachine) -> u64 {
    candy_machine
        .data
        .items_available
        .saturating_sub(candy_machine.items_redeemed)
}
