use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::WhitelistUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateWhitelist<'info> {
    #[account(
        mut,
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    pub governance: Signer<'info>,
}

pub fn add_to_whitelist(ctx: Context<UpdateWhitelist>, member: Pubkey) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    let controller = &mut ctx.accounts.controller;
    controller.add_to_whitelist(&governance, member)?;

    emit!(WhitelistUpdated {
        controller: controller.key(),
        member,
        added: true,
        whitelist_len: controller.roles.whitelist_len,
    });

    msg!("Whitelisted {}", member);

    Ok(())
}

pub fn remove_from_whitelist(ctx: Context<UpdateWhitelist>, member: Pubkey) -> Result<()> {
    let governance = ctx.accounts.governance.key();
    let controller = &mut ctx.accounts.controller;
    controller.remove_from_whitelist(&governance, &member)?;

    emit!(WhitelistUpdated {
        controller: controller.key(),
        member,
        added: false,
        whitelist_len: controller.roles.whitelist_len,
    });

    msg!("Removed {} from whitelist", member);

    Ok(())
}
