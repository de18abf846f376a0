use anchor_client::solana_sdk::pubkey::Pubkey;

use crate::candy_machine::CANDY_MACHINE_ID;

pub fn find_metadata_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = mpl_token_metadata::pda::find_metadata_account(mint);
    pda
}

pub fn find_master_edition_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = mpl_token_metadata::pda::find_master_edition_account(mint);
    pda
}

pub fn find_candy_machine_creator_pda(candy_machine_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"candy_machine", candy_machine_id.as_ref()],
        &CANDY_MACHINE_ID,
    )
}
