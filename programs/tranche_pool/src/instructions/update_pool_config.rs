use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::events::PoolConfigUpdated;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct UpdatePoolConfig<'info> {
    #[account(
        mut,
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
        constraint = controller.roles.is_governance(&governance.key()) @ PoolError::Unauthorized,
    )]
    pub controller: Account<'info, Controller>,

    pub governance: Signer<'info>,
}

pub fn update_pool_config(
    ctx: Context<UpdatePoolConfig>,
    params: UpdatePoolConfigParams,
) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    ctx.accounts.controller.update_config(&governance, params)?;
    config_updated(&ctx.accounts.controller)
}

pub fn set_withdrawal_fee(
    ctx: Context<UpdatePoolConfig>,
    class: ShareClass,
    fee_bps: u64,
) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    ctx.accounts.controller.set_withdrawal_fee(&governance, class, fee_bps)?;
    config_updated(&ctx.accounts.controller)
}

pub fn set_big_fish_threshold(
    ctx: Context<UpdatePoolConfig>,
    threshold_bps: u64,
    usd_threshold: u128,
) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    ctx.accounts
        .controller
        .set_big_fish_threshold(&governance, threshold_bps, usd_threshold)?;
    config_updated(&ctx.accounts.controller)
}

pub fn set_utilisation_ratio_limit(
    ctx: Context<UpdatePoolConfig>,
    limit_bps: u64,
) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    ctx.accounts
        .controller
        .set_utilisation_ratio_limit(&governance, limit_bps)?;
    config_updated(&ctx.accounts.controller)
}

fn config_updated(controller: &Account<Controller>) -> Result<()> {
    emit!(PoolConfigUpdated {
        controller: controller.key(),
        senior_withdrawal_fee: controller.senior_withdrawal_fee,
        junior_withdrawal_fee: controller.junior_withdrawal_fee,
        big_fish_threshold: controller.big_fish_threshold,
        big_fish_usd_threshold: controller.big_fish_usd_threshold,
        utilisation_ratio_limit: controller.utilisation_ratio_limit,
        timestamp: get_current_timestamp()?,
    });

    msg!("Pool configuration updated");

    Ok(())
}
