use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::PoolInitialized;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = governance,
        space = Controller::LEN,
        seeds = [CONTROLLER_SEED],
        bump
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        init,
        payer = governance,
        space = PnlLedger::LEN,
        seeds = [LEDGER_SEED, controller.key().as_ref()],
        bump
    )]
    pub ledger: Account<'info, PnlLedger>,

    #[account(
        init,
        payer = governance,
        space = Buoy::LEN,
        seeds = [BUOY_SEED, controller.key().as_ref()],
        bump
    )]
    pub buoy: Account<'info, Buoy>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_pool(
    ctx: Context<InitializePool>,
    params: InitializePoolParams,
) -> Result<()> {
    let now = get_current_timestamp()?;
    let governance = ctx.accounts.governance.key();
    let controller_key = ctx.accounts.controller.key();
    let ledger_key = ctx.accounts.ledger.key();
    let buoy_key = ctx.accounts.buoy.key();
    let token_decimals = params.token_decimals;

    ctx.accounts.buoy.initialize(controller_key, governance, token_decimals, now, ctx.bumps.buoy)?;
    ctx.accounts.ledger.initialize(controller_key, now, ctx.bumps.ledger)?;

    let controller = &mut ctx.accounts.controller;
    controller.initialize(governance, ledger_key, buoy_key, params, now, ctx.bumps.controller)?;

    emit!(PoolInitialized {
        controller: controller_key,
        ledger: ledger_key,
        buoy: buoy_key,
        governance,
        token_decimals,
        senior_withdrawal_fee: controller.senior_withdrawal_fee,
        junior_withdrawal_fee: controller.junior_withdrawal_fee,
        timestamp: now,
    });

    msg!("Pool initialized: {}", controller_key);

    Ok(())
}
