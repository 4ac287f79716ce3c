use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::math::mul_div;
use crate::oracle::check_token_index;
use crate::state::{RoleTable, ShareClass, SystemMode};

/// Pool-wide configuration, roles and operating mode
#[account]
#[derive(Default)]
pub struct Controller {
    /// Governance and whitelisted operators
    pub roles: RoleTable,
    /// Current operating mode
    pub mode: SystemMode,
    /// PnL ledger account
    pub ledger: Pubkey,
    /// Price oracle account
    pub buoy: Pubkey,
    /// Vault adaptor per stablecoin (unset until registered)
    pub vault_adaptors: [Pubkey; N_COINS],
    /// Withdrawal fee for senior redemptions (in basis points)
    pub senior_withdrawal_fee: u64,
    /// Withdrawal fee for junior redemptions (in basis points)
    pub junior_withdrawal_fee: u64,
    /// Big fish threshold as basis points of pooled assets (0 disables)
    pub big_fish_threshold: u64,
    /// Big fish threshold in USD, 18 decimals (0 disables)
    pub big_fish_usd_threshold: u128,
    /// Max junior/senior asset ratio in basis points (0 disables)
    pub utilisation_ratio_limit: u64,
    /// Last mode transition
    pub mode_changed_at: i64,
    /// Stablecoin flagged by the last switch to emergency
    pub emergency_coin: u8,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Controller {
    pub const LEN: usize = 8 + // discriminator
        RoleTable::LEN + // roles
        SystemMode::LEN + // mode
        32 + // ledger
        32 + // buoy
        32 * N_COINS + // vault_adaptors
        8 + // senior_withdrawal_fee
        8 + // junior_withdrawal_fee
        8 + // big_fish_threshold
        16 + // big_fish_usd_threshold
        8 + // utilisation_ratio_limit
        8 + // mode_changed_at
        1 + // emergency_coin
        1 + // bump
        32; // _reserved

    pub fn initialize(
        &mut self,
        governance: Pubkey,
        ledger: Pubkey,
        buoy: Pubkey,
        params: InitializePoolParams,
        now: i64,
        bump: u8,
    ) -> PoolResult<()> {
        self.roles = RoleTable::new(governance);
        self.mode = SystemMode::Normal;
        self.ledger = ledger;
        self.buoy = buoy;
        self.vault_adaptors = [Pubkey::default(); N_COINS];
        self.senior_withdrawal_fee = params.senior_withdrawal_fee.unwrap_or(DEFAULT_WITHDRAWAL_FEE);
        self.junior_withdrawal_fee = params.junior_withdrawal_fee.unwrap_or(DEFAULT_WITHDRAWAL_FEE);
        self.big_fish_threshold = params.big_fish_threshold.unwrap_or(0);
        self.big_fish_usd_threshold = params.big_fish_usd_threshold.unwrap_or(0);
        self.utilisation_ratio_limit = params.utilisation_ratio_limit.unwrap_or(0);
        self.mode_changed_at = now;
        self.emergency_coin = 0;
        self.bump = bump;

        // Validate configuration
        if self.senior_withdrawal_fee > MAX_WITHDRAWAL_FEE || self.junior_withdrawal_fee > MAX_WITHDRAWAL_FEE {
            return Err(PoolError::InvalidConfig);
        }
        if self.big_fish_threshold as u128 > BASIS_POINTS_PRECISION {
            return Err(PoolError::InvalidConfig);
        }

        Ok(())
    }

    pub fn register_vault_adaptor(&mut self, caller: &Pubkey, index: u8, adaptor: Pubkey) -> PoolResult<()> {
        self.roles.require_governance(caller)?;
        let index = index as usize;
        if index >= N_COINS {
            return Err(PoolError::InvalidTokenIndex);
        }
        if self.vault_adaptors[index] != Pubkey::default() {
            return Err(PoolError::InvalidConfig);
        }
        self.vault_adaptors[index] = adaptor;
        Ok(())
    }

    /// Whitelisted operators and governance may halt the pool
    pub fn pause(&mut self, caller: &Pubkey, now: i64) -> PoolResult<SystemMode> {
        self.roles.require_operator(caller)?;
        self.transition(self.mode.pause()?, now)
    }

    /// Switch to emergency on behalf of the vault for `coin`
    pub fn emergency(&mut self, caller: &Pubkey, coin: u8, now: i64) -> PoolResult<SystemMode> {
        self.roles.require_operator(caller)?;
        let coin = check_token_index(coin as usize)? as u8;
        let next = self.mode.emergency()?;
        self.emergency_coin = coin;
        self.transition(next, now)
    }

    /// Only governance restarts the pool
    pub fn unpause(&mut self, caller: &Pubkey, now: i64) -> PoolResult<SystemMode> {
        self.roles.require_governance(caller)?;
        self.transition(self.mode.unpause()?, now)
    }

    fn transition(&mut self, next: SystemMode, now: i64) -> PoolResult<SystemMode> {
        let previous = self.mode;
        self.mode = next;
        self.mode_changed_at = now;
        msg!("Pool mode {:?} -> {:?}", previous, next);
        Ok(previous)
    }

    pub fn withdrawal_fee(&self, class: ShareClass) -> u64 {
        match class {
            ShareClass::Senior => self.senior_withdrawal_fee,
            ShareClass::Junior => self.junior_withdrawal_fee,
        }
    }

    pub fn set_withdrawal_fee(&mut self, caller: &Pubkey, class: ShareClass, fee_bps: u64) -> PoolResult<()> {
        self.roles.require_governance(caller)?;
        if fee_bps > MAX_WITHDRAWAL_FEE {
            return Err(PoolError::InvalidConfig);
        }
        match class {
            ShareClass::Senior => self.senior_withdrawal_fee = fee_bps,
            ShareClass::Junior => self.junior_withdrawal_fee = fee_bps,
        }
        Ok(())
    }

    pub fn set_big_fish_threshold(&mut self, caller: &Pubkey, threshold_bps: u64, usd_threshold: u128) -> PoolResult<()> {
        self.roles.require_governance(caller)?;
        if threshold_bps as u128 > BASIS_POINTS_PRECISION {
            return Err(PoolError::InvalidConfig);
        }
        self.big_fish_threshold = threshold_bps;
        self.big_fish_usd_threshold = usd_threshold;
        Ok(())
    }

    pub fn set_utilisation_ratio_limit(&mut self, caller: &Pubkey, limit_bps: u64) -> PoolResult<()> {
        self.roles.require_governance(caller)?;
        self.utilisation_ratio_limit = limit_bps;
        Ok(())
    }

    pub fn add_to_whitelist(&mut self, caller: &Pubkey, member: Pubkey) -> PoolResult<()> {
        self.roles.require_governance(caller)?;
        self.roles.add_to_whitelist(member)
    }

    pub fn remove_from_whitelist(&mut self, caller: &Pubkey, member: &Pubkey) -> PoolResult<()> {
        self.roles.require_governance(caller)?;
        self.roles.remove_from_whitelist(member)
    }

    /// A redemption crossing either enabled threshold skips the proportional
    /// path and is served by a single vault.
    pub fn is_big_fish(&self, usd: u128, pooled_assets: u128) -> PoolResult<bool> {
        if self.big_fish_usd_threshold > 0 && usd > self.big_fish_usd_threshold {
            return Ok(true);
        }
        if self.big_fish_threshold > 0 {
            let limit = mul_div(pooled_assets, self.big_fish_threshold as u128, BASIS_POINTS_PRECISION)?;
            return Ok(usd > limit);
        }
        Ok(false)
    }

    pub fn update_config(&mut self, caller: &Pubkey, params: UpdatePoolConfigParams) -> PoolResult<()> {
        self.roles.require_governance(caller)?;

        // validate everything before touching state
        let senior_fee = params.senior_withdrawal_fee.unwrap_or(self.senior_withdrawal_fee);
        let junior_fee = params.junior_withdrawal_fee.unwrap_or(self.junior_withdrawal_fee);
        let big_fish = params.big_fish_threshold.unwrap_or(self.big_fish_threshold);
        if senior_fee > MAX_WITHDRAWAL_FEE || junior_fee > MAX_WITHDRAWAL_FEE {
            return Err(PoolError::InvalidConfig);
        }
        if big_fish as u128 > BASIS_POINTS_PRECISION {
            return Err(PoolError::InvalidConfig);
        }

        self.senior_withdrawal_fee = senior_fee;
        self.junior_withdrawal_fee = junior_fee;
        self.big_fish_threshold = big_fish;
        if let Some(usd_threshold) = params.big_fish_usd_threshold {
            self.big_fish_usd_threshold = usd_threshold;
        }
        if let Some(limit) = params.utilisation_ratio_limit {
            self.utilisation_ratio_limit = limit;
        }

        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct InitializePoolParams {
    pub token_decimals: [u8; N_COINS],
    pub senior_withdrawal_fee: Option<u64>,
    pub junior_withdrawal_fee: Option<u64>,
    pub big_fish_threshold: Option<u64>,
    pub big_fish_usd_threshold: Option<u128>,
    pub utilisation_ratio_limit: Option<u64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdatePoolConfigParams {
    pub senior_withdrawal_fee: Option<u64>,
    pub junior_withdrawal_fee: Option<u64>,
    pub big_fish_threshold: Option<u64>,
    pub big_fish_usd_threshold: Option<u128>,
    pub utilisation_ratio_limit: Option<u64>,
}
