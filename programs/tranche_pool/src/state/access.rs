use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// Capability table checked at every privileged entry point.
///
/// Governance configures the pool and restarts it; whitelisted operators
/// (keepers, the PnL runner) may execute PnL rounds and halt the pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleTable {
    pub governance: Pubkey,
    pub whitelist: [Pubkey; MAX_WHITELIST],
    pub whitelist_len: u8,
}

impl RoleTable {
    pub const LEN: usize = 32 + // governance
        32 * MAX_WHITELIST + // whitelist
        1; // whitelist_len

    pub fn new(governance: Pubkey) -> Self {
        Self {
            governance,
            whitelist: [Pubkey::default(); MAX_WHITELIST],
            whitelist_len: 0,
        }
    }

    pub fn members(&self) -> &[Pubkey] {
        &self.whitelist[..self.whitelist_len as usize]
    }

    pub fn is_governance(&self, caller: &Pubkey) -> bool {
        self.governance == *caller
    }

    pub fn is_whitelisted(&self, caller: &Pubkey) -> bool {
        self.members().contains(caller)
    }

    pub fn require_governance(&self, caller: &Pubkey) -> PoolResult<()> {
        if !self.is_governance(caller) {
            return Err(PoolError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_whitelisted(&self, caller: &Pubkey) -> PoolResult<()> {
        if !self.is_whitelisted(caller) {
            return Err(PoolError::Unauthorized);
        }
        Ok(())
    }

    /// Governance or any whitelisted operator
    pub fn require_operator(&self, caller: &Pubkey) -> PoolResult<()> {
        if self.is_governance(caller) || self.is_whitelisted(caller) {
            return Ok(());
        }
        Err(PoolError::Unauthorized)
    }

    pub fn add_to_whitelist(&mut self, member: Pubkey) -> PoolResult<()> {
        if member == Pubkey::default() {
            return Err(PoolError::InvalidConfig);
        }
        if self.is_whitelisted(&member) {
            return Ok(());
        }
        let len = self.whitelist_len as usize;
        if len >= MAX_WHITELIST {
            return Err(PoolError::WhitelistFull);
        }
        self.whitelist[len] = member;
        self.whitelist_len += 1;
        Ok(())
    }

    pub fn remove_from_whitelist(&mut self, member: &Pubkey) -> PoolResult<()> {
        let len = self.whitelist_len as usize;
        let position = self.whitelist[..len]
            .iter()
            .position(|m| m == member)
            .ok_or(PoolError::InvalidConfig)?;

        // swap-remove keeps the occupied prefix contiguous
        self.whitelist[position] = self.whitelist[len - 1];
        self.whitelist[len - 1] = Pubkey::default();
        self.whitelist_len -= 1;
        Ok(())
    }
}
