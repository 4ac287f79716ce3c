use crate::constants::*;
use crate::error::*;
use crate::math::SafeMath;

/// Stablecoin and LP pricing used by the ledger and the withdrawal engine.
///
/// USD values carry `USD_DECIMALS`; token amounts are in each coin's base units.
pub trait PriceOracle {
    /// USD value of `amount` base units of coin `index`, rounded down or up.
    fn single_stable_to_usd(&self, amount: u64, index: usize, round_up: bool) -> PoolResult<u128>;

    /// Base units of coin `index` worth `usd`, rounded down.
    fn single_stable_from_usd(&self, usd: u128, index: usize) -> PoolResult<u64>;

    fn lp_to_usd(&self, lp_amount: u128) -> PoolResult<u128>;

    fn usd_to_lp(&self, usd: u128) -> PoolResult<u128>;

    /// USD value of a basket. Deposit-side valuations round down so the pool
    /// never credits more than it received; withdrawal-side valuations round up.
    fn stable_to_usd(&self, amounts: &[u64; N_COINS], deposit: bool) -> PoolResult<u128> {
        let mut usd = 0u128;
        for (index, amount) in amounts.iter().enumerate() {
            if *amount > 0 {
                usd = usd.safe_add(self.single_stable_to_usd(*amount, index, !deposit)?)?;
            }
        }
        Ok(usd)
    }

    /// USD value of each vault's holdings
    fn vault_usd_balances(&self, vault_assets: &[u64; N_COINS]) -> PoolResult<[u128; N_COINS]> {
        let mut balances = [0u128; N_COINS];
        for (index, amount) in vault_assets.iter().enumerate() {
            balances[index] = self.single_stable_to_usd(*amount, index, false)?;
        }
        Ok(balances)
    }

    /// Live pool total across every vault
    fn total_usd(&self, vault_assets: &[u64; N_COINS]) -> PoolResult<u128> {
        self.vault_usd_balances(vault_assets)?
            .iter()
            .try_fold(0u128, |acc, usd| acc.safe_add(*usd))
    }
}

pub fn check_token_index(index: usize) -> PoolResult<usize> {
    if index >= N_COINS {
        return Err(PoolError::InvalidTokenIndex);
    }
    Ok(index)
}
