use static_assertions::const_assert;

/// Number of pooled stablecoins (DAI, USDC, USDT)
pub const N_COINS: usize = 3;

/// Precision constants
pub const USD_DECIMALS: u8 = 18;
pub const USD_PRECISION: u128 = 1_000_000_000_000_000_000; // 1e18
pub const LP_PRECISION: u128 = 1_000_000_000_000_000_000; // 1e18
pub const BASIS_POINTS_PRECISION: u128 = 10_000;

/// Senior assets never drop below one USD once a loss wipes the class out,
/// so share price math downstream never divides by zero.
pub const SENIOR_LOSS_FLOOR: u128 = USD_PRECISION;

/// Fee constants (in basis points)
pub const DEFAULT_WITHDRAWAL_FEE: u64 = 50; // 0.5%
pub const MAX_WITHDRAWAL_FEE: u64 = 1_000; // 10%

/// Token decimals the oracle accepts for a stablecoin
pub const MAX_TOKEN_DECIMALS: u8 = 12;

/// Access control
pub const MAX_WHITELIST: usize = 8;

/// PDA seeds
pub const CONTROLLER_SEED: &[u8] = b"controller";
pub const LEDGER_SEED: &[u8] = b"ledger";
pub const BUOY_SEED: &[u8] = b"buoy";
pub const VAULT_ADAPTOR_SEED: &[u8] = b"vault_adaptor";
pub const VAULT_TOKEN_ACCOUNT_SEED: &[u8] = b"vault_token_account";
pub const DEPOSITOR_SEED: &[u8] = b"depositor";

const_assert!(MAX_WHITELIST <= u8::MAX as usize);
const_assert!(N_COINS <= u8::MAX as usize);
const_assert!(MAX_WITHDRAWAL_FEE as u128 <= BASIS_POINTS_PRECISION);
