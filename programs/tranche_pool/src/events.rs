use anchor_lang::prelude::*;
use crate::constants::N_COINS;
use crate::state::{ShareClass, SystemMode};
use crate::withdrawal::WithdrawalRoute;

#[event]
pub struct PoolInitialized {
    pub controller: Pubkey,
    pub ledger: Pubkey,
    pub buoy: Pubkey,
    pub governance: Pubkey,
    pub token_decimals: [u8; N_COINS],
    pub senior_withdrawal_fee: u64,
    pub junior_withdrawal_fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultAdaptorRegistered {
    pub controller: Pubkey,
    pub vault_adaptor: Pubkey,
    pub index: u8,
    pub token_mint: Pubkey,
}

#[event]
pub struct Deposited {
    pub controller: Pubkey,
    pub depositor: Pubkey,
    pub class: ShareClass,
    pub token_amounts: [u64; N_COINS],
    pub usd_amount: u128,
    pub lp_amount: u128,
    pub shares_minted: u128,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub controller: Pubkey,
    pub depositor: Pubkey,
    pub class: ShareClass,
    pub route: WithdrawalRoute,
    pub mode: SystemMode,
    pub token_amounts: [u64; N_COINS],
    pub gross_usd: u128,
    pub fee_usd: u128,
    pub net_usd: u128,
    pub shares_burned: u128,
    pub timestamp: i64,
}

#[event]
pub struct VaultPnlReported {
    pub vault_adaptor: Pubkey,
    pub index: u8,
    pub gain: u64,
    pub loss: u64,
    pub total_assets: u64,
    pub timestamp: i64,
}

#[event]
pub struct PnlExecuted {
    pub ledger: Pubkey,
    pub executed_by: Pubkey,
    pub gain_usd: u128,
    pub loss_usd: u128,
    pub unreported_usd: i128,
    pub senior_assets: u128,
    pub junior_assets: u128,
    pub total_assets: u128,
    pub round: u64,
    pub timestamp: i64,
}

#[event]
pub struct TriggersEvaluated {
    pub ledger: Pubkey,
    pub pnl_trigger: bool,
    pub total_assets_trigger: bool,
    pub total_assets: u128,
    pub last_total_assets: u128,
    pub timestamp: i64,
}

#[event]
pub struct ModeChanged {
    pub controller: Pubkey,
    pub changed_by: Pubkey,
    pub previous: SystemMode,
    pub current: SystemMode,
    /// Flagged stablecoin when switching to emergency
    pub coin: Option<u8>,
    pub timestamp: i64,
}

#[event]
pub struct ThresholdsUpdated {
    pub ledger: Pubkey,
    pub gain_percent_threshold: u64,
    pub loss_percent_threshold: u64,
    pub total_assets_percent_threshold: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolConfigUpdated {
    pub controller: Pubkey,
    pub senior_withdrawal_fee: u64,
    pub junior_withdrawal_fee: u64,
    pub big_fish_threshold: u64,
    pub big_fish_usd_threshold: u128,
    pub utilisation_ratio_limit: u64,
    pub timestamp: i64,
}

#[event]
pub struct WhitelistUpdated {
    pub controller: Pubkey,
    pub member: Pubkey,
    pub added: bool,
    pub whitelist_len: u8,
}

#[event]
pub struct PricesUpdated {
    pub buoy: Pubkey,
    pub prices: [u128; N_COINS],
    pub virtual_price: u128,
    pub timestamp: i64,
}
