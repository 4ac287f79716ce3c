use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::constants::*;
use crate::error::*;
use crate::events::VaultPnlReported;
use crate::math::SafeMath;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct ReportVaultPnl<'info> {
    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
        constraint = controller.roles.is_whitelisted(&operator.key()) @ PoolError::Unauthorized,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        mut,
        constraint = vault_adaptor.controller == controller.key() @ PoolError::InvalidConfig,
    )]
    pub vault_adaptor: Account<'info, VaultAdaptor>,

    #[account(
        constraint = vault_token_account.key() == vault_adaptor.vault_token_account @ PoolError::InvalidTokenAccount,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub operator: Signer<'info>,
}

/// Record a harvest result for one vault; it is distributed by the next PnL round.
pub fn report_vault_pnl(
    ctx: Context<ReportVaultPnl>,
    gain: u64,
    loss: u64,
) -> Result<()> {
    if gain == 0 && loss == 0 {
        return Err(PoolError::InvalidAmount.into());
    }

    let now = get_current_timestamp()?;
    let adaptor = &mut ctx.accounts.vault_adaptor;

    if gain > 0 {
        // a gain must already sit in the vault's token account
        let backed = adaptor.total_assets.safe_add(gain)?;
        if backed > ctx.accounts.vault_token_account.amount {
            return Err(PoolError::InsufficientBalance.into());
        }
        adaptor.record_gain(gain, now)?;
    }
    if loss > 0 {
        adaptor.record_loss(loss, now)?;
    }

    emit!(VaultPnlReported {
        vault_adaptor: adaptor.key(),
        index: adaptor.index,
        gain,
        loss,
        total_assets: adaptor.total_assets,
        timestamp: now,
    });

    msg!("Vault {} reported gain {} loss {}", adaptor.index, gain, loss);

    Ok(())
}
