use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::ModeChanged;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct SetMode<'info> {
    #[account(
        mut,
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    pub caller: Signer<'info>,
}

/// Halt deposits; withdrawals keep working
pub fn pause(ctx: Context<SetMode>) -> Result<()> {
    let now = get_current_timestamp()?;
    let caller = ctx.accounts.caller.key();
    let previous = ctx.accounts.controller.pause(&caller, now)?;
    emit_mode_change(&ctx.accounts.controller, caller, previous, None, now);
    Ok(())
}

/// Switch withdrawals to the single-vault routes
pub fn emergency(ctx: Context<SetMode>, coin: u8) -> Result<()> {
    let now = get_current_timestamp()?;
    let caller = ctx.accounts.caller.key();
    let previous = ctx.accounts.controller.emergency(&caller, coin, now)?;
    emit_mode_change(&ctx.accounts.controller, caller, previous, Some(coin), now);
    Ok(())
}

pub fn unpause(ctx: Context<SetMode>) -> Result<()> {
    let now = get_current_timestamp()?;
    let caller = ctx.accounts.caller.key();
    let previous = ctx.accounts.controller.unpause(&caller, now)?;
    emit_mode_change(&ctx.accounts.controller, caller, previous, None, now);
    Ok(())
}

fn emit_mode_change(
    controller: &Account<Controller>,
    changed_by: Pubkey,
    previous: SystemMode,
    coin: Option<u8>,
    now: i64,
) {
    emit!(ModeChanged {
        controller: controller.key(),
        changed_by,
        previous,
        current: controller.mode,
        coin,
        timestamp: now,
    });
}
