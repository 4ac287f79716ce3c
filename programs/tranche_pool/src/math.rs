use crate::error::*;
use ethnum::U256;

/// Safe math operations trait to prevent overflows
pub trait SafeMath<T> {
    fn safe_add(&self, other: T) -> PoolResult<T>;
    fn safe_sub(&self, other: T) -> PoolResult<T>;
    fn safe_mul(&self, other: T) -> PoolResult<T>;
    fn safe_div(&self, other: T) -> PoolResult<T>;
}

/// Implementation for u64
impl SafeMath<u64> for u64 {
    fn safe_add(&self, other: u64) -> PoolResult<u64> {
        self.checked_add(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_sub(&self, other: u64) -> PoolResult<u64> {
        self.checked_sub(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_mul(&self, other: u64) -> PoolResult<u64> {
        self.checked_mul(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_div(&self, other: u64) -> PoolResult<u64> {
        if other == 0 {
            return Err(PoolError::DivisionByZero);
        }
        self.checked_div(other).ok_or(PoolError::MathOverflow)
    }
}

/// Implementation for u128
impl SafeMath<u128> for u128 {
    fn safe_add(&self, other: u128) -> PoolResult<u128> {
        self.checked_add(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_sub(&self, other: u128) -> PoolResult<u128> {
        self.checked_sub(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_mul(&self, other: u128) -> PoolResult<u128> {
        self.checked_mul(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_div(&self, other: u128) -> PoolResult<u128> {
        if other == 0 {
            return Err(PoolError::DivisionByZero);
        }
        self.checked_div(other).ok_or(PoolError::MathOverflow)
    }
}

/// Implementation for i128 (signed PnL deltas)
impl SafeMath<i128> for i128 {
    fn safe_add(&self, other: i128) -> PoolResult<i128> {
        self.checked_add(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_sub(&self, other: i128) -> PoolResult<i128> {
        self.checked_sub(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_mul(&self, other: i128) -> PoolResult<i128> {
        self.checked_mul(other).ok_or(PoolError::MathOverflow)
    }

    fn safe_div(&self, other: i128) -> PoolResult<i128> {
        if other == 0 {
            return Err(PoolError::DivisionByZero);
        }
        self.checked_div(other).ok_or(PoolError::MathOverflow)
    }
}

/// Safe casting operations
pub trait SafeCast<T> {
    fn safe_cast(&self) -> PoolResult<T>;
}

impl SafeCast<u64> for u128 {
    fn safe_cast(&self) -> PoolResult<u64> {
        if *self > u64::MAX as u128 {
            return Err(PoolError::MathOverflow);
        }
        Ok(*self as u64)
    }
}

impl SafeCast<u128> for u64 {
    fn safe_cast(&self) -> PoolResult<u128> {
        Ok(*self as u128)
    }
}

impl SafeCast<i128> for u128 {
    fn safe_cast(&self) -> PoolResult<i128> {
        if *self > i128::MAX as u128 {
            return Err(PoolError::MathOverflow);
        }
        Ok(*self as i128)
    }
}

impl SafeCast<u128> for i128 {
    fn safe_cast(&self) -> PoolResult<u128> {
        if *self < 0 {
            return Err(PoolError::MathOverflow);
        }
        Ok(*self as u128)
    }
}

/// `a * b / denominator` with a 256-bit intermediate, truncating.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> PoolResult<u128> {
    if denominator == 0 {
        return Err(PoolError::DivisionByZero);
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(denominator);
    if quotient > U256::from(u128::MAX) {
        return Err(PoolError::MathOverflow);
    }
    Ok(quotient.as_u128())
}

/// `a * b / denominator` with a 256-bit intermediate, rounding up.
pub fn mul_div_ceil(a: u128, b: u128, denominator: u128) -> PoolResult<u128> {
    if denominator == 0 {
        return Err(PoolError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let mut quotient = product / denominator;
    if product % denominator != U256::ZERO {
        quotient += U256::ONE;
    }
    if quotient > U256::from(u128::MAX) {
        return Err(PoolError::MathOverflow);
    }
    Ok(quotient.as_u128())
}

/// Profit-and-loss distribution between the senior and junior classes.
///
/// Gains are shared pro-rata to the current claims. Losses are absorbed by the
/// senior class first; once they exceed it the senior claim is pinned to
/// `SENIOR_LOSS_FLOOR` and the junior class pays the excess plus that floor,
/// which keeps `senior + junior == previous total + delta` exact.
pub mod pnl_math {
    use super::*;
    use crate::constants::*;

    pub fn distribute_pnl(delta: i128, senior_prev: u128, junior_prev: u128) -> PoolResult<(u128, u128)> {
        if delta >= 0 {
            distribute_gain(delta.safe_cast()?, senior_prev, junior_prev)
        } else {
            absorb_loss(delta.unsigned_abs(), senior_prev, junior_prev)
        }
    }

    pub fn distribute_gain(gain: u128, senior_prev: u128, junior_prev: u128) -> PoolResult<(u128, u128)> {
        let total_prev = senior_prev.safe_add(junior_prev)?;
        let total_new = total_prev.safe_add(gain)?;

        // Nothing to weigh the gain against; the risk-bearing class takes it.
        if total_prev == 0 {
            return Ok((gain, 0));
        }

        let senior_new = senior_prev.safe_add(mul_div(gain, senior_prev, total_prev)?)?;
        let junior_new = total_new.safe_sub(senior_new)?;

        Ok((senior_new, junior_new))
    }

    pub fn absorb_loss(loss: u128, senior_prev: u128, junior_prev: u128) -> PoolResult<(u128, u128)> {
        if loss <= senior_prev {
            return Ok((senior_prev.safe_sub(loss)?, junior_prev));
        }

        let junior_hit = loss
            .safe_sub(senior_prev)?
            .safe_add(SENIOR_LOSS_FLOOR)?;
        let junior_new = junior_prev.safe_sub(junior_hit)?;

        Ok((SENIOR_LOSS_FLOOR, junior_new))
    }

    /// Value that moved without a vault report belongs to the senior class.
    pub fn apply_unreported_change(change: i128, senior: u128, junior: u128) -> PoolResult<(u128, u128)> {
        if change >= 0 {
            Ok((senior.safe_add(change.safe_cast()?)?, junior))
        } else {
            absorb_loss(change.unsigned_abs(), senior, junior)
        }
    }

    /// Settle a round: the reported delta and the unreported change on top of it.
    ///
    /// A reported loss and an unreported decrease are absorbed as one loss
    /// against the previous claims, so the senior floor is applied once.
    pub fn settle_round(
        reported: i128,
        unreported: i128,
        senior_prev: u128,
        junior_prev: u128,
    ) -> PoolResult<(u128, u128)> {
        if reported < 0 && unreported < 0 {
            let loss = reported.unsigned_abs().safe_add(unreported.unsigned_abs())?;
            return absorb_loss(loss, senior_prev, junior_prev);
        }

        let (senior, junior) = distribute_pnl(reported, senior_prev, junior_prev)?;
        apply_unreported_change(unreported, senior, junior)
    }

    /// `amount` as basis points of `base`, truncating. Any non-zero amount
    /// against an empty base saturates.
    pub fn percent_change_bps(amount: u128, base: u128) -> PoolResult<u128> {
        if base == 0 {
            return Ok(if amount == 0 { 0 } else { u128::MAX });
        }
        mul_div(amount, BASIS_POINTS_PRECISION, base)
    }

    /// A zero threshold disables the trigger.
    pub fn exceeds_threshold(amount: u128, base: u128, threshold_bps: u64) -> PoolResult<bool> {
        if threshold_bps == 0 {
            return Ok(false);
        }
        Ok(percent_change_bps(amount, base)? > threshold_bps as u128)
    }
}

/// Share accounting for a single class
pub mod share_math {
    use super::*;
    use crate::constants::*;

    /// Shares minted for `assets` USD entering a class
    pub fn calculate_shares(assets: u128, total_supply: u128, total_assets: u128) -> PoolResult<u128> {
        if total_supply == 0 {
            return Ok(assets);
        }
        mul_div(assets, total_supply, total_assets)
    }

    /// USD claim of `shares`
    pub fn calculate_assets(shares: u128, total_supply: u128, total_assets: u128) -> PoolResult<u128> {
        if total_supply == 0 {
            return Ok(0);
        }
        mul_div(shares, total_assets, total_supply)
    }

    /// Shares to burn so that at least `assets` USD leaves the class
    pub fn calculate_shares_for_assets(assets: u128, total_supply: u128, total_assets: u128) -> PoolResult<u128> {
        if total_supply == 0 {
            return Err(PoolError::InsufficientBalance);
        }
        mul_div_ceil(assets, total_supply, total_assets)
    }

    /// Split `gross` into (net, fee) for a basis-point fee
    pub fn deduct_fee(gross: u128, fee_bps: u64) -> PoolResult<(u128, u128)> {
        let fee = mul_div(gross, fee_bps as u128, BASIS_POINTS_PRECISION)?;
        Ok((gross.safe_sub(fee)?, fee))
    }
}
