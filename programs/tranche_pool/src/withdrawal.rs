use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::math::{mul_div, share_math, SafeMath};
use crate::oracle::{check_token_index, PriceOracle};
use crate::state::{Controller, PnlLedger, ShareClass};

/// Where the tokens of a redemption come from
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawalRoute {
    /// Every vault pays its USD share of the redemption
    Proportional,
    /// Big fish: the vault holding the most USD pays everything
    LargestVault { vault_index: u8 },
    /// The caller picked the coin
    SingleStable { vault_index: u8 },
}

/// Fully sized redemption, ready to be applied to the accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalPlan {
    /// Tokens each vault pays the user, in base units
    pub token_amounts: [u64; N_COINS],
    /// USD claim given up by the user
    pub gross_usd: u128,
    /// Withdrawal fee left with the class
    pub fee_usd: u128,
    /// USD leaving the pool
    pub net_usd: u128,
    pub shares_burned: u128,
    pub route: WithdrawalRoute,
}

/// Read-only view of the pool a withdrawal is planned against
pub struct PoolSnapshot<'a, O: PriceOracle> {
    pub controller: &'a Controller,
    pub ledger: &'a PnlLedger,
    pub oracle: &'a O,
    /// Tokens held by each vault adaptor
    pub vault_assets: [u64; N_COINS],
}

struct Redemption {
    gross_usd: u128,
    fee_usd: u128,
    net_usd: u128,
    shares: u128,
}

impl<'a, O: PriceOracle> PoolSnapshot<'a, O> {
    pub fn new(controller: &'a Controller, ledger: &'a PnlLedger, oracle: &'a O, vault_assets: [u64; N_COINS]) -> Self {
        Self {
            controller,
            ledger,
            oracle,
            vault_assets,
        }
    }

    /// USD value of the pooled vaults
    pub fn total_assets(&self) -> PoolResult<u128> {
        self.oracle.total_usd(&self.vault_assets)
    }

    fn size_redemption(&self, class: ShareClass, held_shares: u128, gross_usd: u128) -> PoolResult<Redemption> {
        if gross_usd == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let shares = self.ledger.class(class).shares_to_burn(gross_usd, held_shares)?;
        let (net_usd, fee_usd) = share_math::deduct_fee(gross_usd, self.controller.withdrawal_fee(class))?;

        if class == ShareClass::Senior {
            let senior_after = self
                .ledger
                .senior
                .last_assets
                .checked_sub(net_usd)
                .ok_or(PoolError::InsufficientBalance)?;
            PnlLedger::check_utilisation(
                self.controller.utilisation_ratio_limit,
                senior_after,
                self.ledger.junior.last_assets,
            )?;
        }

        Ok(Redemption {
            gross_usd,
            fee_usd,
            net_usd,
            shares,
        })
    }

    fn finish(
        &self,
        redemption: Redemption,
        token_amounts: [u64; N_COINS],
        min_amounts: &[u64; N_COINS],
        route: WithdrawalRoute,
    ) -> PoolResult<WithdrawalPlan> {
        for index in 0..N_COINS {
            if token_amounts[index] > self.vault_assets[index] {
                return Err(PoolError::InsufficientBalance);
            }
            if token_amounts[index] < min_amounts[index] {
                return Err(PoolError::SlippageExceeded);
            }
        }

        Ok(WithdrawalPlan {
            token_amounts,
            gross_usd: redemption.gross_usd,
            fee_usd: redemption.fee_usd,
            net_usd: redemption.net_usd,
            shares_burned: redemption.shares,
            route,
        })
    }

    /// Redeem `lp_amount` worth of a class claim. Small redemptions are spread
    /// over the vaults pro rata; big fish are paid by the largest vault.
    pub fn plan_withdraw_by_lp_token(
        &self,
        class: ShareClass,
        held_shares: u128,
        lp_amount: u128,
        min_amounts: &[u64; N_COINS],
    ) -> PoolResult<WithdrawalPlan> {
        if self.controller.mode.is_emergency() {
            return Err(PoolError::InvalidState);
        }
        if lp_amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let gross_usd = self.oracle.lp_to_usd(lp_amount)?;
        let redemption = self.size_redemption(class, held_shares, gross_usd)?;

        let balances = self.oracle.vault_usd_balances(&self.vault_assets)?;
        let pooled = balances.iter().try_fold(0u128, |acc, usd| acc.safe_add(*usd))?;

        if self.controller.is_big_fish(gross_usd, pooled)? {
            let index = largest_vault(&balances);
            let mut token_amounts = [0u64; N_COINS];
            token_amounts[index] = self.oracle.single_stable_from_usd(redemption.net_usd, index)?;
            let route = WithdrawalRoute::LargestVault { vault_index: index as u8 };
            return self.finish(redemption, token_amounts, min_amounts, route);
        }

        let token_amounts = get_vault_deltas(self.oracle, &self.vault_assets, redemption.net_usd)?;
        self.finish(redemption, token_amounts, min_amounts, WithdrawalRoute::Proportional)
    }

    /// Redeem `usd_amount` of a class claim in coin `index`. Available in every mode.
    pub fn plan_withdraw_by_stablecoin(
        &self,
        class: ShareClass,
        held_shares: u128,
        index: usize,
        usd_amount: u128,
        min_amount: u64,
    ) -> PoolResult<WithdrawalPlan> {
        let index = check_token_index(index)?;
        let redemption = self.size_redemption(class, held_shares, usd_amount)?;
        self.single_stable(redemption, index, min_amount)
    }

    /// Redeem the whole class claim in coin `index`.
    pub fn plan_withdraw_all_single(
        &self,
        class: ShareClass,
        held_shares: u128,
        index: usize,
        min_amount: u64,
    ) -> PoolResult<WithdrawalPlan> {
        let index = check_token_index(index)?;
        let claim = self.ledger.class(class).assets_for_shares(held_shares)?;
        let redemption = self.size_redemption(class, held_shares, claim)?;
        self.single_stable(redemption, index, min_amount)
    }

    fn single_stable(&self, redemption: Redemption, index: usize, min_amount: u64) -> PoolResult<WithdrawalPlan> {
        let mut token_amounts = [0u64; N_COINS];
        let mut min_amounts = [0u64; N_COINS];
        token_amounts[index] = self.oracle.single_stable_from_usd(redemption.net_usd, index)?;
        min_amounts[index] = min_amount;
        let route = WithdrawalRoute::SingleStable { vault_index: index as u8 };
        self.finish(redemption, token_amounts, &min_amounts, route)
    }
}

/// Tokens each vault pays so that `usd` leaves the pool in proportion to the
/// vaults' USD balances.
pub fn get_vault_deltas<O: PriceOracle>(
    oracle: &O,
    vault_assets: &[u64; N_COINS],
    usd: u128,
) -> PoolResult<[u64; N_COINS]> {
    let balances = oracle.vault_usd_balances(vault_assets)?;
    let total = balances.iter().try_fold(0u128, |acc, b| acc.safe_add(*b))?;
    if total == 0 || usd > total {
        return Err(PoolError::InsufficientBalance);
    }

    let mut deltas = [0u64; N_COINS];
    for (index, balance) in balances.iter().enumerate() {
        if *balance == 0 {
            continue;
        }
        let part = mul_div(usd, *balance, total)?;
        deltas[index] = oracle.single_stable_from_usd(part, index)?;
    }
    Ok(deltas)
}

/// Index of the vault with the largest USD balance, lowest index on ties
pub fn largest_vault(balances: &[u128; N_COINS]) -> usize {
    let mut largest = 0;
    for index in 1..N_COINS {
        if balances[index] > balances[largest] {
            largest = index;
        }
    }
    largest
}
