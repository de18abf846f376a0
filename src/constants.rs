use console::Emoji;

pub const DEFAULT_CONFIG: &str = "config.json";

/// Display name used when neither the off-chain document nor the on-chain
/// record carries a usable name.
pub const DEFAULT_NFT_NAME: &str = "Unnamed NFT";

/// Number of metadata resolution attempts after a mint.
pub const METADATA_RETRY_ATTEMPTS: u8 = 5;

/// Base inter-attempt delay; the effective delay grows linearly with the
/// attempt number (attempt 1 -> base, attempt 2 -> 2x base, ...).
pub const METADATA_RETRY_DELAY_MS: u64 = 800;

/// Hard cap for tip transfers, as a guard against fat-finger amounts.
pub const MAX_TIP_SOL: f64 = 100.0;

/// Size of an spl-token mint account.
pub const MINT_LAYOUT: u64 = 82;

pub const DEFAULT_RPC_DEVNET: &str = "https://api.devnet.solana.com";

pub static LOOKING_GLASS_EMOJI: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static CANDY_EMOJI: Emoji<'_, '_> = Emoji("🍬 ", "");
pub static GIFT_EMOJI: Emoji<'_, '_> = Emoji("🎁 ", "");
pub static WALLET_EMOJI: Emoji<'_, '_> = Emoji("👛 ", "");
pub static MONEY_EMOJI: Emoji<'_, '_> = Emoji("💸 ", "");
pub static CONFETTI_EMOJI: Emoji<'_, '_> = Emoji("🎉 ", "");
pub static COMPLETE_EMOJI: Emoji<'_, '_> = Emoji("✅ ", "");
pub static ERROR_EMOJI: Emoji<'_, '_> = Emoji("🛑 ", "");
pub static WARNING_EMOJI: Emoji<'_, '_> = Emoji("⚠️  ", "");
