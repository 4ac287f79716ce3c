use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::events::ThresholdsUpdated;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct UpdateThresholds<'info> {
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

    pub governance: Signer<'info>,
}

pub fn update_thresholds(
    ctx: Context<UpdateThresholds>,
    params: UpdateThresholdsParams,
) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    let roles = ctx.accounts.controller.roles;
    ctx.accounts.ledger.update_thresholds(&roles, &governance, params)?;
    thresholds_updated(&ctx.accounts.ledger)
}

pub fn set_gain_percent_threshold(ctx: Context<UpdateThresholds>, bps: u64) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    let roles = ctx.accounts.controller.roles;
    ctx.accounts.ledger.set_gain_percent_threshold(&roles, &governance, bps)?;
    thresholds_updated(&ctx.accounts.ledger)
}

pub fn set_loss_percent_threshold(ctx: Context<UpdateThresholds>, bps: u64) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    let roles = ctx.accounts.controller.roles;
    ctx.accounts.ledger.set_loss_percent_threshold(&roles, &governance, bps)?;
    thresholds_updated(&ctx.accounts.ledger)
}

pub fn set_total_assets_percent_threshold(ctx: Context<UpdateThresholds>, bps: u64) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    let roles = ctx.accounts.controller.roles;
    ctx.accounts
        .ledger
        .set_total_assets_percent_threshold(&roles, &governance, bps)?;
    thresholds_updated(&ctx.accounts.ledger)
}

fn thresholds_updated(ledger: &Account<PnlLedger>) -> Result<()> {
    emit!(ThresholdsUpdated {
        ledger: ledger.key(),
        gain_percent_threshold: ledger.gain_percent_threshold,
        loss_percent_threshold: ledger.loss_percent_threshold,
        total_assets_percent_threshold: ledger.total_assets_percent_threshold,
        timestamp: get_current_timestamp()?,
    });

    msg!("PnL thresholds updated");

    Ok(())
}
