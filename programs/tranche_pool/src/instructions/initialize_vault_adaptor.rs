use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::error::*;
use crate::events::VaultAdaptorRegistered;
use crate::state::*;

#[derive(Accounts)]
#[instruction(index: u8)]
pub struct InitializeVaultAdaptor<'info> {
    #[account(
        mut,
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
        constraint = controller.roles.is_governance(&governance.key()) @ PoolError::Unauthorized,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        constraint = buoy.key() == controller.buoy @ PoolError::InvalidConfig,
    )]
    pub buoy: Account<'info, Buoy>,

    #[account(
        init,
        payer = governance,
        space = VaultAdaptor::LEN,
        seeds = [VAULT_ADAPTOR_SEED, controller.key().as_ref(), &[index]],
        bump
    )]
    pub vault_adaptor: Account<'info, VaultAdaptor>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = governance,
        token::mint = token_mint,
        token::authority = controller,
        seeds = [VAULT_TOKEN_ACCOUNT_SEED, vault_adaptor.key().as_ref()],
        bump
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_vault_adaptor(
    ctx: Context<InitializeVaultAdaptor>,
    index: u8,
) -> Result<()> {
    if index as usize >= N_COINS {
        return Err(PoolError::InvalidTokenIndex.into());
    }
    // the oracle prices this coin with the decimals it was configured with
    if ctx.accounts.token_mint.decimals != ctx.accounts.buoy.decimals[index as usize] {
        return Err(PoolError::InvalidTokenMint.into());
    }

    let controller_key = ctx.accounts.controller.key();
    let adaptor_key = ctx.accounts.vault_adaptor.key();
    let token_mint = ctx.accounts.token_mint.key();

    ctx.accounts.vault_adaptor.initialize(
        controller_key,
        index,
        token_mint,
        ctx.accounts.vault_token_account.key(),
        ctx.bumps.vault_adaptor,
    )?;

    let governance = ctx.accounts.governance.key();
    ctx.accounts
        .controller
        .register_vault_adaptor(&governance, index, adaptor_key)?;

    emit!(VaultAdaptorRegistered {
        controller: controller_key,
        vault_adaptor: adaptor_key,
        index,
        token_mint,
    });

    msg!("Vault adaptor {} registered for coin {}", adaptor_key, index);

    Ok(())
}
