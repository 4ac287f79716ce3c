use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::events::PnlExecuted;
use crate::instructions::pool_accounts::*;
use crate::oracle::PriceOracle;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct ExecPnl<'info> {
    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        mut,
        constraint = ledger.key() == controller.ledger @ PoolError::InvalidConfig,
    )]
    pub ledger: Account<'info, PnlLedger>,

    #[account(
        constraint = buoy.key() == controller.buoy @ PoolError::InvalidConfig,
    )]
    pub buoy: Account<'info, Buoy>,

    pub vaults: PoolVaults<'info>,

    pub operator: Signer<'info>,
}

pub fn exec_pnl(ctx: Context<ExecPnl>) -> Result<()> {
    let now = get_current_timestamp()?;
    let accounts = ctx.accounts;
    accounts.vaults.validate(&accounts.controller)?;

    let reports = accounts.vaults.pending_reports();
    let total_assets = accounts.buoy.total_usd(&accounts.vaults.assets())?;
    let operator = accounts.operator.key();

    let outcome = accounts.ledger.exec_pnl(
        &accounts.controller.roles,
        &operator,
        &reports,
        &*accounts.buoy,
        total_assets,
        now,
    )?;

    // reports are consumed only once the round went through
    for index in 0..N_COINS {
        accounts.vaults.adaptor_mut(index)?.take_report();
    }

    if !outcome.executed {
        msg!("PnL round skipped: nothing changed");
        return Ok(());
    }

    emit!(PnlExecuted {
        ledger: accounts.ledger.key(),
        executed_by: operator,
        gain_usd: outcome.gain_usd,
        loss_usd: outcome.loss_usd,
        unreported_usd: outcome.unreported_usd,
        senior_assets: outcome.senior_assets,
        junior_assets: outcome.junior_assets,
        total_assets: outcome.total_assets,
        round: accounts.ledger.pnl_rounds,
        timestamp: now,
    });

    msg!(
        "PnL round {}: senior {} junior {} total {}",
        accounts.ledger.pnl_rounds,
        outcome.senior_assets,
        outcome.junior_assets,
        outcome.total_assets
    );

    Ok(())
}
