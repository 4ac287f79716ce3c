use anchor_lang::prelude::*;
use crate::error::*;
use crate::math::SafeMath;

/// Realised gain/loss a vault reports into one PnL round, in token base units
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultReport {
    pub vault_index: u8,
    pub gain: u64,
    pub loss: u64,
}

impl VaultReport {
    pub fn is_empty(&self) -> bool {
        self.gain == 0 && self.loss == 0
    }
}

/// Per-stablecoin yield vault
#[account]
#[derive(Default)]
pub struct VaultAdaptor {
    /// Controller this vault belongs to
    pub controller: Pubkey,
    /// Stablecoin index (0 = DAI, 1 = USDC, 2 = USDT)
    pub index: u8,
    /// Underlying stablecoin mint
    pub token_mint: Pubkey,
    /// Token account holding the vault's liquidity
    pub vault_token_account: Pubkey,
    /// Assets under management in token base units
    pub total_assets: u64,
    /// Gain realised since the last PnL round
    pub pending_gain: u64,
    /// Loss realised since the last PnL round
    pub pending_loss: u64,
    /// Last gain/loss report
    pub last_report: i64,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl VaultAdaptor {
    pub const LEN: usize = 8 + // discriminator
        32 + // controller
        1 + // index
        32 + // token_mint
        32 + // vault_token_account
        8 + // total_assets
        8 + // pending_gain
        8 + // pending_loss
        8 + // last_report
        1 + // bump
        16; // _reserved

    pub fn initialize(
        &mut self,
        controller: Pubkey,
        index: u8,
        token_mint: Pubkey,
        vault_token_account: Pubkey,
        bump: u8,
    ) -> PoolResult<()> {
        self.controller = controller;
        self.index = index;
        self.token_mint = token_mint;
        self.vault_token_account = vault_token_account;
        self.total_assets = 0;
        self.pending_gain = 0;
        self.pending_loss = 0;
        self.last_report = 0;
        self.bump = bump;

        Ok(())
    }

    pub fn deposit(&mut self, amount: u64) -> PoolResult<()> {
        self.total_assets = self.total_assets.safe_add(amount)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64) -> PoolResult<()> {
        if amount > self.total_assets {
            return Err(PoolError::InsufficientBalance);
        }
        self.total_assets -= amount;
        Ok(())
    }

    /// Strategy harvest reported a gain; it becomes part of the vault immediately
    /// and is distributed on the next PnL round.
    pub fn record_gain(&mut self, amount: u64, now: i64) -> PoolResult<()> {
        let total_assets = self.total_assets.safe_add(amount)?;
        self.pending_gain = self.pending_gain.safe_add(amount)?;
        self.total_assets = total_assets;
        self.last_report = now;
        Ok(())
    }

    pub fn record_loss(&mut self, amount: u64, now: i64) -> PoolResult<()> {
        if amount > self.total_assets {
            return Err(PoolError::InsufficientBalance);
        }
        self.pending_loss = self.pending_loss.safe_add(amount)?;
        self.total_assets -= amount;
        self.last_report = now;
        Ok(())
    }

    /// Report without consuming it
    pub fn pending_report(&self) -> VaultReport {
        VaultReport {
            vault_index: self.index,
            gain: self.pending_gain,
            loss: self.pending_loss,
        }
    }

    /// Hand the pending report to a PnL round; each delta is reported once.
    pub fn take_report(&mut self) -> VaultReport {
        let report = self.pending_report();
        self.pending_gain = 0;
        self.pending_loss = 0;
        report
    }
}
