use anchor_lang::prelude::*;
use crate::error::*;
use crate::math::SafeMath;
use crate::state::ShareClass;

#[account]
#[derive(Default)]
pub struct Depositor {
    /// The controller this depositor belongs to
    pub controller: Pubkey,
    /// The depositor's authority
    pub authority: Pubkey,
    /// Senior ("gvt") shares held
    pub senior_shares: u128,
    /// Junior ("pwrd") shares held
    pub junior_shares: u128,
    /// Total USD deposited
    pub total_deposited_usd: u128,
    /// Total USD withdrawn (net of fees)
    pub total_withdrawn_usd: u128,
    /// When the depositor was created
    pub created_at: i64,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u64; 4],
}

impl Depositor {
    pub const LEN: usize = 8 + // discriminator
        32 + // controller
        32 + // authority
        16 + // senior_shares
        16 + // junior_shares
        16 + // total_deposited_usd
        16 + // total_withdrawn_usd
        8 + // created_at
        1 + // bump
        32; // _reserved

    pub fn initialize(&mut self, controller: Pubkey, authority: Pubkey, now: i64, bump: u8) -> PoolResult<()> {
        self.controller = controller;
        self.authority = authority;
        self.senior_shares = 0;
        self.junior_shares = 0;
        self.total_deposited_usd = 0;
        self.total_withdrawn_usd = 0;
        self.created_at = now;
        self.bump = bump;

        Ok(())
    }

    pub fn shares(&self, class: ShareClass) -> u128 {
        match class {
            ShareClass::Senior => self.senior_shares,
            ShareClass::Junior => self.junior_shares,
        }
    }

    fn shares_mut(&mut self, class: ShareClass) -> &mut u128 {
        match class {
            ShareClass::Senior => &mut self.senior_shares,
            ShareClass::Junior => &mut self.junior_shares,
        }
    }

    pub fn mint(&mut self, class: ShareClass, shares: u128, usd: u128) -> PoolResult<()> {
        let held = self.shares_mut(class);
        *held = held.safe_add(shares)?;
        self.total_deposited_usd = self.total_deposited_usd.safe_add(usd)?;
        Ok(())
    }

    pub fn burn(&mut self, class: ShareClass, shares: u128, usd_out: u128) -> PoolResult<()> {
        let held = self.shares_mut(class);
        if shares > *held {
            return Err(PoolError::InsufficientBalance);
        }
        *held -= shares;
        self.total_withdrawn_usd = self.total_withdrawn_usd.safe_add(usd_out)?;
        Ok(())
    }
}
