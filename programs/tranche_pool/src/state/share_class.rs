use anchor_lang::prelude::*;
use crate::error::*;
use crate::math::{share_math, SafeMath};

/// The two claims on pooled assets.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareClass {
    /// Risk-bearing "gvt" class
    Senior,
    /// Protected "pwrd" class
    Junior,
}

/// Last recorded claim and supply of one class
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShareClassState {
    /// USD claim on pooled assets (18 decimals)
    pub last_assets: u128,
    /// Outstanding shares
    pub total_supply: u128,
}

impl ShareClassState {
    pub const LEN: usize = 16 + // last_assets
        16; // total_supply

    pub fn assets_for_shares(&self, shares: u128) -> PoolResult<u128> {
        share_math::calculate_assets(shares, self.total_supply, self.last_assets)
    }

    pub fn shares_for_deposit(&self, usd: u128) -> PoolResult<u128> {
        if self.total_supply > 0 && self.last_assets == 0 {
            return Err(PoolError::InvalidState);
        }
        share_math::calculate_shares(usd, self.total_supply, self.last_assets)
    }

    /// Shares a holder of `held` burns to take `usd` out of the class
    pub fn shares_to_burn(&self, usd: u128, held: u128) -> PoolResult<u128> {
        let claim = self.assets_for_shares(held)?;
        if usd > claim {
            return Err(PoolError::InsufficientBalance);
        }
        if usd == claim {
            return Ok(held);
        }
        let shares = share_math::calculate_shares_for_assets(usd, self.total_supply, self.last_assets)?;
        Ok(shares.min(held))
    }

    pub fn mint(&mut self, shares: u128, usd: u128) -> PoolResult<()> {
        self.total_supply = self.total_supply.safe_add(shares)?;
        self.last_assets = self.last_assets.safe_add(usd)?;
        Ok(())
    }

    pub fn burn(&mut self, shares: u128, usd: u128) -> PoolResult<()> {
        let supply_after = self
            .total_supply
            .checked_sub(shares)
            .ok_or(PoolError::InsufficientBalance)?;
        let assets_after = self
            .last_assets
            .checked_sub(usd)
            .ok_or(PoolError::InsufficientBalance)?;
        self.total_supply = supply_after;
        self.last_assets = assets_after;
        Ok(())
    }
}
