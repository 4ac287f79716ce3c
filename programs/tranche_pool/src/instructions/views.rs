use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::events::TriggersEvaluated;
use crate::instructions::pool_accounts::*;
use crate::oracle::PriceOracle;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct CalcPnl<'info> {
    pub ledger: Account<'info, PnlLedger>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassAssets {
    pub senior_assets: u128,
    pub junior_assets: u128,
}

pub fn calc_pnl(ctx: Context<CalcPnl>) -> Result<ClassAssets> {
    let (senior_assets, junior_assets) = ctx.accounts.ledger.calc_pnl();
    Ok(ClassAssets {
        senior_assets,
        junior_assets,
    })
}

#[derive(Accounts)]
pub struct CheckTriggers<'info> {
    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        constraint = ledger.key() == controller.ledger @ PoolError::InvalidConfig,
    )]
    pub ledger: Account<'info, PnlLedger>,

    #[account(
        constraint = buoy.key() == controller.buoy @ PoolError::InvalidConfig,
    )]
    pub buoy: Account<'info, Buoy>,

    pub vaults: PoolVaults<'info>,
}

/// Evaluate the drift triggers against the pending vault reports and the
/// live vault total. Advisory only.
pub fn check_triggers(ctx: Context<CheckTriggers>) -> Result<TriggerStatus> {
    let accounts = &ctx.accounts;
    accounts.vaults.validate(&accounts.controller)?;

    let reports = accounts.vaults.pending_reports();
    let total_assets = accounts.buoy.total_usd(&accounts.vaults.assets())?;
    let status = accounts.ledger.check_triggers(&reports, &*accounts.buoy, total_assets)?;

    emit!(TriggersEvaluated {
        ledger: accounts.ledger.key(),
        pnl_trigger: status.pnl_trigger,
        total_assets_trigger: status.total_assets_trigger,
        total_assets,
        last_total_assets: accounts.ledger.last_total_assets,
        timestamp: get_current_timestamp()?,
    });

    Ok(status)
}
