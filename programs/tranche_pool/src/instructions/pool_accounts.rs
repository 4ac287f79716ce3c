use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::constants::*;
use crate::error::*;
use crate::state::*;

/// The three vault adaptors and the token accounts holding their liquidity
#[derive(Accounts)]
pub struct PoolVaults<'info> {
    #[account(mut)]
    pub adaptor_0: Account<'info, VaultAdaptor>,
    #[account(mut)]
    pub adaptor_1: Account<'info, VaultAdaptor>,
    #[account(mut)]
    pub adaptor_2: Account<'info, VaultAdaptor>,

    #[account(
        mut,
        constraint = token_account_0.key() == adaptor_0.vault_token_account @ PoolError::InvalidTokenAccount,
    )]
    pub token_account_0: Account<'info, TokenAccount>,
    #[account(
        mut,
        constraint = token_account_1.key() == adaptor_1.vault_token_account @ PoolError::InvalidTokenAccount,
    )]
    pub token_account_1: Account<'info, TokenAccount>,
    #[account(
        mut,
        constraint = token_account_2.key() == adaptor_2.vault_token_account @ PoolError::InvalidTokenAccount,
    )]
    pub token_account_2: Account<'info, TokenAccount>,
}

impl<'info> PoolVaults<'info> {
    /// Adaptors must be the ones registered on the controller, in coin order
    pub fn validate(&self, controller: &Controller) -> Result<()> {
        for index in 0..N_COINS {
            let adaptor = self.adaptor(index)?;
            if adaptor.key() != controller.vault_adaptors[index] || adaptor.index as usize != index {
                return Err(PoolError::InvalidConfig.into());
            }
        }
        Ok(())
    }

    pub fn adaptor(&self, index: usize) -> Result<&Account<'info, VaultAdaptor>> {
        match index {
            0 => Ok(&self.adaptor_0),
            1 => Ok(&self.adaptor_1),
            2 => Ok(&self.adaptor_2),
            _ => Err(PoolError::InvalidTokenIndex.into()),
        }
    }

    pub fn adaptor_mut(&mut self, index: usize) -> Result<&mut Account<'info, VaultAdaptor>> {
        match index {
            0 => Ok(&mut self.adaptor_0),
            1 => Ok(&mut self.adaptor_1),
            2 => Ok(&mut self.adaptor_2),
            _ => Err(PoolError::InvalidTokenIndex.into()),
        }
    }

    pub fn token_account(&self, index: usize) -> Result<&Account<'info, TokenAccount>> {
        match index {
            0 => Ok(&self.token_account_0),
            1 => Ok(&self.token_account_1),
            2 => Ok(&self.token_account_2),
            _ => Err(PoolError::InvalidTokenIndex.into()),
        }
    }

    /// Tokens under management per coin
    pub fn assets(&self) -> [u64; N_COINS] {
        [
            self.adaptor_0.total_assets,
            self.adaptor_1.total_assets,
            self.adaptor_2.total_assets,
        ]
    }

    pub fn pending_reports(&self) -> [VaultReport; N_COINS] {
        [
            self.adaptor_0.pending_report(),
            self.adaptor_1.pending_report(),
            self.adaptor_2.pending_report(),
        ]
    }
}

/// The user's token account for each coin
#[derive(Accounts)]
pub struct UserTokenAccounts<'info> {
    #[account(mut)]
    pub token_account_0: Account<'info, TokenAccount>,
    #[account(mut)]
    pub token_account_1: Account<'info, TokenAccount>,
    #[account(mut)]
    pub token_account_2: Account<'info, TokenAccount>,
}

impl<'info> UserTokenAccounts<'info> {
    pub fn validate(&self, vaults: &PoolVaults<'info>, owner: &Pubkey) -> Result<()> {
        for index in 0..N_COINS {
            let account = self.token_account(index)?;
            if account.mint != vaults.adaptor(index)?.token_mint {
                return Err(PoolError::InvalidTokenMint.into());
            }
            if account.owner != *owner {
                return Err(PoolError::Unauthorized.into());
            }
        }
        Ok(())
    }

    pub fn token_account(&self, index: usize) -> Result<&Account<'info, TokenAccount>> {
        match index {
            0 => Ok(&self.token_account_0),
            1 => Ok(&self.token_account_1),
            2 => Ok(&self.token_account_2),
            _ => Err(PoolError::InvalidTokenIndex.into()),
        }
    }
}
