// Shared fixtures: an off-chain pool driven through the same state methods
// the instruction handlers call.

#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use tranche_pool::constants::*;
use tranche_pool::error::*;
use tranche_pool::oracle::PriceOracle;
use tranche_pool::state::*;
use tranche_pool::withdrawal::{PoolSnapshot, WithdrawalPlan};

/// DAI, USDC, USDT mint decimals
pub const DECIMALS: [u8; N_COINS] = [9, 6, 6];

pub const DAI: usize = 0;
pub const USDC: usize = 1;
pub const USDT: usize = 2;

pub fn usd(amount: u128) -> u128 {
    amount * USD_PRECISION
}

pub fn thousand_usd(amount: u128) -> u128 {
    usd(amount * 1_000)
}

/// Whole tokens of coin `index` in base units
pub fn tokens(amount: u64, index: usize) -> u64 {
    amount * 10u64.pow(DECIMALS[index] as u32)
}

/// The same number of whole tokens of every coin
pub fn basket(amount: u64) -> [u64; N_COINS] {
    [tokens(amount, DAI), tokens(amount, USDC), tokens(amount, USDT)]
}

pub fn assert_close(actual: u128, expected: u128, tolerance: u128) {
    let diff = actual.abs_diff(expected);
    assert!(
        diff <= tolerance,
        "{} differs from {} by {} (tolerance {})",
        actual,
        expected,
        diff,
        tolerance
    );
}

pub fn par_buoy() -> Buoy {
    let mut buoy = Buoy::default();
    buoy.initialize(Pubkey::new_unique(), Pubkey::new_unique(), DECIMALS, 0, 255)
        .unwrap();
    buoy
}

/// Ledger already carrying the given class claims at one USD per share
pub fn seeded_ledger(senior: u128, junior: u128) -> PnlLedger {
    let mut ledger = PnlLedger::default();
    ledger.initialize(Pubkey::new_unique(), 0, 255).unwrap();
    ledger.senior = ShareClassState {
        last_assets: senior,
        total_supply: senior,
    };
    ledger.junior = ShareClassState {
        last_assets: junior,
        total_supply: junior,
    };
    ledger.last_total_assets = senior + junior;
    ledger
}

pub fn report(index: usize, gain: u64, loss: u64) -> VaultReport {
    VaultReport {
        vault_index: index as u8,
        gain,
        loss,
    }
}

pub struct TestPool {
    pub controller: Controller,
    pub ledger: PnlLedger,
    pub buoy: Buoy,
    pub adaptors: [VaultAdaptor; N_COINS],
    /// Tokens transferred out of the vault token accounts so far
    pub paid_out: [u64; N_COINS],
    pub governance: Pubkey,
    pub keeper: Pubkey,
    pub now: i64,
}

impl TestPool {
    pub fn new() -> Self {
        Self::with_params(InitializePoolParams {
            token_decimals: DECIMALS,
            ..InitializePoolParams::default()
        })
    }

    pub fn with_params(params: InitializePoolParams) -> Self {
        let governance = Pubkey::new_unique();
        let keeper = Pubkey::new_unique();
        let now = 1_700_000_000;

        let mut controller = Controller::default();
        controller
            .initialize(governance, Pubkey::new_unique(), Pubkey::new_unique(), params, now, 255)
            .unwrap();
        controller.add_to_whitelist(&governance, keeper).unwrap();

        let mut ledger = PnlLedger::default();
        ledger.initialize(Pubkey::new_unique(), now, 254).unwrap();

        let adaptors = std::array::from_fn(|index| {
            let mut adaptor = VaultAdaptor::default();
            adaptor
                .initialize(Pubkey::new_unique(), index as u8, Pubkey::new_unique(), Pubkey::new_unique(), 252)
                .unwrap();
            adaptor
        });

        Self {
            controller,
            ledger,
            buoy: par_buoy(),
            adaptors,
            paid_out: [0; N_COINS],
            governance,
            keeper,
            now,
        }
    }

    pub fn new_depositor(&self) -> Depositor {
        let mut depositor = Depositor::default();
        depositor
            .initialize(Pubkey::new_unique(), Pubkey::new_unique(), self.now, 253)
            .unwrap();
        depositor
    }

    /// Mirrors the deposit instruction without the token transfers
    pub fn deposit(
        &mut self,
        depositor: &mut Depositor,
        class: ShareClass,
        amounts: [u64; N_COINS],
    ) -> PoolResult<u128> {
        self.controller.mode.ensure_deposits_allowed()?;
        let usd_amount = self.buoy.stable_to_usd(&amounts, true)?;
        let shares = self
            .ledger
            .record_deposit(class, usd_amount, self.controller.utilisation_ratio_limit)?;
        for (index, amount) in amounts.iter().enumerate() {
            self.adaptors[index].deposit(*amount)?;
        }
        depositor.mint(class, shares, usd_amount)?;
        Ok(shares)
    }

    /// Assets each vault adaptor holds, in token base units
    pub fn vault_assets(&self) -> [u64; N_COINS] {
        std::array::from_fn(|index| self.adaptors[index].total_assets)
    }

    pub fn snapshot(&self) -> PoolSnapshot<'_, Buoy> {
        PoolSnapshot::new(&self.controller, &self.ledger, &self.buoy, self.vault_assets())
    }

    /// Mirrors the withdrawal instructions' apply step, with each transfer
    /// counted in `paid_out`; returns what the user received
    pub fn apply(&mut self, depositor: &mut Depositor, class: ShareClass, plan: &WithdrawalPlan) -> [u64; N_COINS] {
        self.ledger
            .record_withdrawal(class, plan.shares_burned, plan.net_usd)
            .unwrap();
        depositor.burn(class, plan.shares_burned, plan.net_usd).unwrap();

        let paid_before = self.paid_out;
        for (index, amount) in plan.token_amounts.iter().enumerate() {
            if *amount == 0 {
                continue;
            }
            self.adaptors[index].withdraw(*amount).unwrap();
            self.paid_out[index] += amount;
        }
        std::array::from_fn(|index| self.paid_out[index] - paid_before[index])
    }

    /// Mirrors a vault harvest followed by a keeper round over the taken reports
    pub fn harvest(&mut self, index: usize, gain: u64) -> PoolResult<PnlOutcome> {
        self.adaptors[index].record_gain(gain, self.now)?;
        let reports: Vec<VaultReport> = self.adaptors.iter().map(|a| a.pending_report()).collect();
        let total = self.total_assets();
        let roles = self.controller.roles;
        let outcome = self
            .ledger
            .exec_pnl(&roles, &self.keeper, &reports, &self.buoy, total, self.now)?;
        for adaptor in self.adaptors.iter_mut() {
            adaptor.take_report();
        }
        Ok(outcome)
    }

    pub fn total_assets(&self) -> u128 {
        self.buoy.total_usd(&self.vault_assets()).unwrap()
    }

    pub fn pause(&mut self) {
        let caller = self.governance;
        self.controller.pause(&caller, self.now).unwrap();
    }

    pub fn emergency(&mut self) {
        let caller = self.governance;
        self.controller.emergency(&caller, DAI as u8, self.now).unwrap();
    }

    /// Investor A with 100 and investor B with 700 of every coin in the senior class
    pub fn with_two_investors() -> (Self, Depositor, Depositor) {
        let mut pool = Self::new();
        let mut investor_a = pool.new_depositor();
        let mut investor_b = pool.new_depositor();
        pool.deposit(&mut investor_a, ShareClass::Senior, basket(100)).unwrap();
        pool.deposit(&mut investor_b, ShareClass::Senior, basket(700)).unwrap();
        (pool, investor_a, investor_b)
    }
}
