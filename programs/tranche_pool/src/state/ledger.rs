use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::math::{pnl_math, SafeCast, SafeMath};
use crate::oracle::{check_token_index, PriceOracle};
use crate::state::{RoleTable, ShareClass, ShareClassState, VaultReport};

/// Last recorded claims of both classes on the pooled assets, plus the
/// drift thresholds that advise when a PnL round is due.
#[account]
#[derive(Default)]
pub struct PnlLedger {
    /// Controller owning this ledger
    pub controller: Pubkey,
    /// Senior ("gvt") claim and supply
    pub senior: ShareClassState,
    /// Junior ("pwrd") claim and supply
    pub junior: ShareClassState,
    /// Sum of both claims at the last mutation (USD, 18 decimals)
    pub last_total_assets: u128,
    /// Reported gain, as bp of last_total_assets, that warrants a round (0 disables)
    pub gain_percent_threshold: u64,
    /// Reported loss, as bp of last_total_assets, that warrants a round (0 disables)
    pub loss_percent_threshold: u64,
    /// Unreported drift of the live total, in bp, that warrants a round (0 disables)
    pub total_assets_percent_threshold: u64,
    /// Last executed PnL round
    pub last_pnl_execution: i64,
    /// Executed PnL rounds
    pub pnl_rounds: u64,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

/// Result of one `exec_pnl` call
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PnlOutcome {
    /// False when nothing changed and the ledger was left untouched
    pub executed: bool,
    pub gain_usd: u128,
    pub loss_usd: u128,
    /// Live total minus the reported expectation
    pub unreported_usd: i128,
    pub senior_assets: u128,
    pub junior_assets: u128,
    pub total_assets: u128,
}

/// Advisory trigger evaluation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerStatus {
    pub pnl_trigger: bool,
    pub total_assets_trigger: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateThresholdsParams {
    pub gain_percent_threshold: Option<u64>,
    pub loss_percent_threshold: Option<u64>,
    pub total_assets_percent_threshold: Option<u64>,
}

impl PnlLedger {
    pub const LEN: usize = 8 + // discriminator
        32 + // controller
        ShareClassState::LEN + // senior
        ShareClassState::LEN + // junior
        16 + // last_total_assets
        8 + // gain_percent_threshold
        8 + // loss_percent_threshold
        8 + // total_assets_percent_threshold
        8 + // last_pnl_execution
        8 + // pnl_rounds
        1 + // bump
        32; // _reserved

    pub fn initialize(&mut self, controller: Pubkey, now: i64, bump: u8) -> PoolResult<()> {
        self.controller = controller;
        self.senior = ShareClassState::default();
        self.junior = ShareClassState::default();
        self.last_total_assets = 0;
        self.gain_percent_threshold = 0;
        self.loss_percent_threshold = 0;
        self.total_assets_percent_threshold = 0;
        self.last_pnl_execution = now;
        self.pnl_rounds = 0;
        self.bump = bump;

        Ok(())
    }

    /// (senior, junior) claims as last recorded
    pub fn calc_pnl(&self) -> (u128, u128) {
        (self.senior.last_assets, self.junior.last_assets)
    }

    pub fn class(&self, class: ShareClass) -> &ShareClassState {
        match class {
            ShareClass::Senior => &self.senior,
            ShareClass::Junior => &self.junior,
        }
    }

    fn class_mut(&mut self, class: ShareClass) -> &mut ShareClassState {
        match class {
            ShareClass::Senior => &mut self.senior,
            ShareClass::Junior => &mut self.junior,
        }
    }

    /// Run one PnL round.
    ///
    /// Reported gains and losses are netted and split between the classes;
    /// whatever the live `total_assets` adds on top of that (value that moved
    /// without a report) is settled against the senior class. Reports are
    /// counted every time they are passed in.
    pub fn exec_pnl<O: PriceOracle>(
        &mut self,
        roles: &RoleTable,
        caller: &Pubkey,
        reports: &[VaultReport],
        oracle: &O,
        total_assets: u128,
        now: i64,
    ) -> PoolResult<PnlOutcome> {
        roles.require_whitelisted(caller)?;

        let (gain_usd, loss_usd) = Self::reported_usd(reports, oracle)?;
        if gain_usd == 0 && loss_usd == 0 && total_assets == self.last_total_assets {
            let (senior_assets, junior_assets) = self.calc_pnl();
            return Ok(PnlOutcome {
                executed: false,
                senior_assets,
                junior_assets,
                total_assets,
                ..PnlOutcome::default()
            });
        }

        let delta = SafeCast::<i128>::safe_cast(&gain_usd)?
            .safe_sub(SafeCast::<i128>::safe_cast(&loss_usd)?)?;
        let expected = SafeCast::<i128>::safe_cast(&self.last_total_assets)?.safe_add(delta)?;
        let unreported_usd = SafeCast::<i128>::safe_cast(&total_assets)?.safe_sub(expected)?;
        let (senior_assets, junior_assets) = pnl_math::settle_round(
            delta,
            unreported_usd,
            self.senior.last_assets,
            self.junior.last_assets,
        )?;

        if senior_assets.safe_add(junior_assets)? != total_assets {
            msg!(
                "PnL round does not conserve assets: {} + {} != {}",
                senior_assets,
                junior_assets,
                total_assets
            );
            return Err(PoolError::InvariantViolation);
        }

        self.senior.last_assets = senior_assets;
        self.junior.last_assets = junior_assets;
        self.last_total_assets = total_assets;
        self.last_pnl_execution = now;
        self.pnl_rounds = self.pnl_rounds.safe_add(1)?;

        self.verify_invariants()?;

        Ok(PnlOutcome {
            executed: true,
            gain_usd,
            loss_usd,
            unreported_usd,
            senior_assets,
            junior_assets,
            total_assets,
        })
    }

    /// Summed (gain, loss) of the reports in USD, rounded down
    pub fn reported_usd<O: PriceOracle>(reports: &[VaultReport], oracle: &O) -> PoolResult<(u128, u128)> {
        let mut gains = [0u64; N_COINS];
        let mut losses = [0u64; N_COINS];
        for report in reports {
            let index = check_token_index(report.vault_index as usize)?;
            gains[index] = gains[index].safe_add(report.gain)?;
            losses[index] = losses[index].safe_add(report.loss)?;
        }
        Ok((oracle.stable_to_usd(&gains, true)?, oracle.stable_to_usd(&losses, true)?))
    }

    /// True when pending gains or losses exceed their threshold
    pub fn pnl_trigger<O: PriceOracle>(&self, reports: &[VaultReport], oracle: &O) -> PoolResult<bool> {
        let (gain_usd, loss_usd) = Self::reported_usd(reports, oracle)?;
        Ok(
            pnl_math::exceeds_threshold(gain_usd, self.last_total_assets, self.gain_percent_threshold)?
                || pnl_math::exceeds_threshold(loss_usd, self.last_total_assets, self.loss_percent_threshold)?,
        )
    }

    /// True when the live total drifted from the last recorded one, either way,
    /// by more than the threshold
    pub fn total_assets_change_trigger(&self, total_assets: u128) -> PoolResult<bool> {
        let drift = total_assets.abs_diff(self.last_total_assets);
        pnl_math::exceeds_threshold(drift, self.last_total_assets, self.total_assets_percent_threshold)
    }

    pub fn check_triggers<O: PriceOracle>(
        &self,
        reports: &[VaultReport],
        oracle: &O,
        total_assets: u128,
    ) -> PoolResult<TriggerStatus> {
        Ok(TriggerStatus {
            pnl_trigger: self.pnl_trigger(reports, oracle)?,
            total_assets_trigger: self.total_assets_change_trigger(total_assets)?,
        })
    }

    pub fn set_gain_percent_threshold(&mut self, roles: &RoleTable, caller: &Pubkey, bps: u64) -> PoolResult<()> {
        roles.require_governance(caller)?;
        self.gain_percent_threshold = bps;
        Ok(())
    }

    pub fn set_loss_percent_threshold(&mut self, roles: &RoleTable, caller: &Pubkey, bps: u64) -> PoolResult<()> {
        roles.require_governance(caller)?;
        self.loss_percent_threshold = bps;
        Ok(())
    }

    pub fn set_total_assets_percent_threshold(
        &mut self,
        roles: &RoleTable,
        caller: &Pubkey,
        bps: u64,
    ) -> PoolResult<()> {
        roles.require_governance(caller)?;
        self.total_assets_percent_threshold = bps;
        Ok(())
    }

    pub fn update_thresholds(
        &mut self,
        roles: &RoleTable,
        caller: &Pubkey,
        params: UpdateThresholdsParams,
    ) -> PoolResult<()> {
        roles.require_governance(caller)?;

        if let Some(bps) = params.gain_percent_threshold {
            self.gain_percent_threshold = bps;
        }
        if let Some(bps) = params.loss_percent_threshold {
            self.loss_percent_threshold = bps;
        }
        if let Some(bps) = params.total_assets_percent_threshold {
            self.total_assets_percent_threshold = bps;
        }

        Ok(())
    }

    /// Credit `usd` to a class and return the shares minted for it.
    /// Junior deposits may not push utilisation above `utilisation_limit`.
    pub fn record_deposit(&mut self, class: ShareClass, usd: u128, utilisation_limit: u64) -> PoolResult<u128> {
        if usd == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let shares = self.class(class).shares_for_deposit(usd)?;
        if shares == 0 {
            return Err(PoolError::InvalidAmount);
        }
        if class == ShareClass::Junior {
            let junior_after = self.junior.last_assets.safe_add(usd)?;
            Self::check_utilisation(utilisation_limit, self.senior.last_assets, junior_after)?;
        }
        let total_after = self.last_total_assets.safe_add(usd)?;

        self.class_mut(class).mint(shares, usd)?;
        self.last_total_assets = total_after;

        self.verify_invariants()?;

        Ok(shares)
    }

    /// Burn `shares` and take `usd_out` out of the class. The fee part of a
    /// redemption is never passed here, so it stays with the class.
    pub fn record_withdrawal(&mut self, class: ShareClass, shares: u128, usd_out: u128) -> PoolResult<()> {
        let total_after = self
            .last_total_assets
            .checked_sub(usd_out)
            .ok_or(PoolError::InsufficientBalance)?;

        self.class_mut(class).burn(shares, usd_out)?;
        self.last_total_assets = total_after;

        self.verify_invariants()
    }

    /// Junior claim as bp of the senior claim
    pub fn utilisation_ratio(senior_assets: u128, junior_assets: u128) -> PoolResult<u128> {
        pnl_math::percent_change_bps(junior_assets, senior_assets)
    }

    /// A zero limit disables the check.
    pub fn check_utilisation(limit_bps: u64, senior_assets: u128, junior_assets: u128) -> PoolResult<()> {
        if limit_bps == 0 {
            return Ok(());
        }
        if Self::utilisation_ratio(senior_assets, junior_assets)? > limit_bps as u128 {
            return Err(PoolError::UtilisationLimitExceeded);
        }
        Ok(())
    }

    pub fn verify_invariants(&self) -> PoolResult<()> {
        // both claims add up to the recorded total
        let claims = self.senior.last_assets.safe_add(self.junior.last_assets)?;
        if claims != self.last_total_assets {
            msg!(
                "INVARIANT VIOLATION: senior ({}) + junior ({}) != last_total_assets ({})",
                self.senior.last_assets,
                self.junior.last_assets,
                self.last_total_assets
            );
            return Err(PoolError::InvariantViolation);
        }

        Ok(())
    }
}
