use anchor_lang::prelude::*;
use constants::N_COINS;
use instructions::*;
use state::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod oracle;
pub mod state;
mod utils;
pub mod withdrawal;

declare_id!("6Gq3xTYbFYwR4EUUDh3Hy2kWSX4d1EhJpTbwyBX9ftNo");

#[program]
pub mod tranche_pool {
    use super::*;

    /// Create the controller, the PnL ledger and the price oracle
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        params: InitializePoolParams,
    ) -> Result<()> {
        instructions::initialize_pool(ctx, params)
    }

    /// Register the vault adaptor for one stablecoin (only governance)
    pub fn initialize_vault_adaptor(
        ctx: Context<InitializeVaultAdaptor>,
        index: u8,
    ) -> Result<()> {
        instructions::initialize_vault_adaptor(ctx, index)
    }

    /// Initialize a depositor
    pub fn initialize_depositor(
        ctx: Context<InitializeDepositor>,
    ) -> Result<()> {
        instructions::initialize_depositor(ctx)
    }

    /// Deposit stablecoins into a share class
    pub fn deposit(
        ctx: Context<Deposit>,
        class: ShareClass,
        amounts: [u64; N_COINS],
        min_lp: u128,
    ) -> Result<()> {
        instructions::deposit(ctx, class, amounts, min_lp)
    }

    /// Withdraw across the vaults (Normal and Paused)
    pub fn withdraw_by_lp_token(
        ctx: Context<Withdraw>,
        class: ShareClass,
        lp_amount: u128,
        min_amounts: [u64; N_COINS],
    ) -> Result<()> {
        instructions::withdraw_by_lp_token(ctx, class, lp_amount, min_amounts)
    }

    /// Withdraw a USD amount in a single stablecoin
    pub fn withdraw_by_stablecoin(
        ctx: Context<Withdraw>,
        class: ShareClass,
        index: u8,
        usd_amount: u128,
        min_amount: u64,
    ) -> Result<()> {
        instructions::withdraw_by_stablecoin(ctx, class, index, usd_amount, min_amount)
    }

    /// Withdraw the whole claim in a single stablecoin
    pub fn withdraw_all_single(
        ctx: Context<Withdraw>,
        class: ShareClass,
        index: u8,
        min_amount: u64,
    ) -> Result<()> {
        instructions::withdraw_all_single(ctx, class, index, min_amount)
    }

    /// Record a vault harvest (whitelisted operators)
    pub fn report_vault_pnl(
        ctx: Context<ReportVaultPnl>,
        gain: u64,
        loss: u64,
    ) -> Result<()> {
        instructions::report_vault_pnl(ctx, gain, loss)
    }

    /// Distribute pending gains and losses between the classes (whitelisted operators)
    pub fn exec_pnl(
        ctx: Context<ExecPnl>,
    ) -> Result<()> {
        instructions::exec_pnl(ctx)
    }

    pub fn calc_pnl(
        ctx: Context<CalcPnl>,
    ) -> Result<ClassAssets> {
        instructions::calc_pnl(ctx)
    }

    pub fn check_triggers(
        ctx: Context<CheckTriggers>,
    ) -> Result<TriggerStatus> {
        instructions::check_triggers(ctx)
    }

    pub fn pause(
        ctx: Context<SetMode>,
    ) -> Result<()> {
        instructions::pause(ctx)
    }

    pub fn emergency(
        ctx: Context<SetMode>,
        coin: u8,
    ) -> Result<()> {
        instructions::emergency(ctx, coin)
    }

    /// Return to normal operation (only governance)
    pub fn unpause(
        ctx: Context<SetMode>,
    ) -> Result<()> {
        instructions::unpause(ctx)
    }

    /// Update pool configuration (only governance)
    pub fn update_pool_config(
        ctx: Context<UpdatePoolConfig>,
        params: UpdatePoolConfigParams,
    ) -> Result<()> {
        instructions::update_pool_config(ctx, params)
    }

    pub fn set_withdrawal_fee(
        ctx: Context<UpdatePoolConfig>,
        class: ShareClass,
        fee_bps: u64,
    ) -> Result<()> {
        instructions::set_withdrawal_fee(ctx, class, fee_bps)
    }

    pub fn set_big_fish_threshold(
        ctx: Context<UpdatePoolConfig>,
        threshold_bps: u64,
        usd_threshold: u128,
    ) -> Result<()> {
        instructions::set_big_fish_threshold(ctx, threshold_bps, usd_threshold)
    }

    pub fn set_utilisation_ratio_limit(
        ctx: Context<UpdatePoolConfig>,
        limit_bps: u64,
    ) -> Result<()> {
        instructions::set_utilisation_ratio_limit(ctx, limit_bps)
    }

    /// Update PnL trigger thresholds (only governance)
    pub fn update_thresholds(
        ctx: Context<UpdateThresholds>,
        params: UpdateThresholdsParams,
    ) -> Result<()> {
        instructions::update_thresholds(ctx, params)
    }

    pub fn set_gain_percent_threshold(
        ctx: Context<UpdateThresholds>,
        bps: u64,
    ) -> Result<()> {
        instructions::set_gain_percent_threshold(ctx, bps)
    }

    pub fn set_loss_percent_threshold(
        ctx: Context<UpdateThresholds>,
        bps: u64,
    ) -> Result<()> {
        instructions::set_loss_percent_threshold(ctx, bps)
    }

    pub fn set_total_assets_percent_threshold(
        ctx: Context<UpdateThresholds>,
        bps: u64,
    ) -> Result<()> {
        instructions::set_total_assets_percent_threshold(ctx, bps)
    }

    pub fn add_to_whitelist(
        ctx: Context<UpdateWhitelist>,
        member: Pubkey,
    ) -> Result<()> {
        instructions::add_to_whitelist(ctx, member)
    }

    pub fn remove_from_whitelist(
        ctx: Context<UpdateWhitelist>,
        member: Pubkey,
    ) -> Result<()> {
        instructions::remove_from_whitelist(ctx, member)
    }

    /// Push stablecoin and LP prices (only the oracle authority)
    pub fn update_prices(
        ctx: Context<UpdatePrices>,
        prices: [u128; N_COINS],
        virtual_price: u128,
    ) -> Result<()> {
        instructions::update_prices(ctx, prices, virtual_price)
    }
}
