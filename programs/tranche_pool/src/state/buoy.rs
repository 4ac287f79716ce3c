use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::math::{mul_div, mul_div_ceil, SafeCast};
use crate::oracle::{check_token_index, PriceOracle};

/// Price snapshot the pool values stablecoins and LP tokens against.
///
/// Aggregation and staleness handling happen off-chain; governance pushes
/// the resulting prices here.
#[account]
#[derive(Default)]
pub struct Buoy {
    /// Controller this oracle serves
    pub controller: Pubkey,
    /// Key allowed to push prices
    pub authority: Pubkey,
    /// USD price of one whole token (18 decimals), per coin
    pub prices: [u128; N_COINS],
    /// Token decimals, per coin
    pub decimals: [u8; N_COINS],
    /// USD value of one LP token (18 decimals)
    pub virtual_price: u128,
    /// Last price push
    pub last_update: i64,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl Buoy {
    pub const LEN: usize = 8 + // discriminator
        32 + // controller
        32 + // authority
        16 * N_COINS + // prices
        N_COINS + // decimals
        16 + // virtual_price
        8 + // last_update
        1 + // bump
        16; // _reserved

    pub fn initialize(
        &mut self,
        controller: Pubkey,
        authority: Pubkey,
        decimals: [u8; N_COINS],
        now: i64,
        bump: u8,
    ) -> PoolResult<()> {
        if decimals.iter().any(|d| *d > MAX_TOKEN_DECIMALS) {
            return Err(PoolError::InvalidConfig);
        }

        self.controller = controller;
        self.authority = authority;
        self.decimals = decimals;
        // Stablecoins and the LP token start at par
        self.prices = [USD_PRECISION; N_COINS];
        self.virtual_price = LP_PRECISION;
        self.last_update = now;
        self.bump = bump;

        Ok(())
    }

    pub fn update_prices(
        &mut self,
        caller: &Pubkey,
        prices: [u128; N_COINS],
        virtual_price: u128,
        now: i64,
    ) -> PoolResult<()> {
        if self.authority != *caller {
            return Err(PoolError::Unauthorized);
        }
        if prices.iter().any(|p| *p == 0) || virtual_price == 0 {
            return Err(PoolError::InvalidPrice);
        }

        self.prices = prices;
        self.virtual_price = virtual_price;
        self.last_update = now;

        Ok(())
    }

    fn token_unit(&self, index: usize) -> u128 {
        10u128.pow(self.decimals[index] as u32)
    }
}

impl PriceOracle for Buoy {
    fn single_stable_to_usd(&self, amount: u64, index: usize, round_up: bool) -> PoolResult<u128> {
        let index = check_token_index(index)?;
        let amount = SafeCast::<u128>::safe_cast(&amount)?;
        if round_up {
            mul_div_ceil(amount, self.prices[index], self.token_unit(index))
        } else {
            mul_div(amount, self.prices[index], self.token_unit(index))
        }
    }

    fn single_stable_from_usd(&self, usd: u128, index: usize) -> PoolResult<u64> {
        let index = check_token_index(index)?;
        mul_div(usd, self.token_unit(index), self.prices[index])?.safe_cast()
    }

    fn lp_to_usd(&self, lp_amount: u128) -> PoolResult<u128> {
        mul_div(lp_amount, self.virtual_price, LP_PRECISION)
    }

    fn usd_to_lp(&self, usd: u128) -> PoolResult<u128> {
        mul_div(usd, LP_PRECISION, self.virtual_price)
    }
}
