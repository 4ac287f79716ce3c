use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct InitializeDepositor<'info> {
    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        init,
        payer = authority,
        space = Depositor::LEN,
        seeds = [DEPOSITOR_SEED, controller.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub depositor: Account<'info, Depositor>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_depositor(ctx: Context<InitializeDepositor>) -> Result<()> {
    let now = get_current_timestamp()?;
    let controller = ctx.accounts.controller.key();
    let authority = ctx.accounts.authority.key();

    ctx.accounts
        .depositor
        .initialize(controller, authority, now, ctx.bumps.depositor)?;

    msg!("Depositor initialized: {}", ctx.accounts.depositor.key());

    Ok(())
}
