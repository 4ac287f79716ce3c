pub mod deposit;
pub mod exec_pnl;
pub mod initialize_depositor;
pub mod initialize_pool;
pub mod initialize_vault_adaptor;
pub mod pool_accounts;
pub mod report_vault_pnl;
pub mod set_mode;
pub mod update_pool_config;
pub mod update_prices;
pub mod update_thresholds;
pub mod views;
pub mod whitelist;
pub mod withdraw;

pub use deposit::*;
pub use exec_pnl::*;
pub use initialize_depositor::*;
pub use initialize_pool::*;
pub use initialize_vault_adaptor::*;
pub use pool_accounts::*;
pub use report_vault_pnl::*;
pub use set_mode::*;
pub use update_pool_config::*;
pub use update_prices::*;
pub use update_thresholds::*;
pub use views::*;
pub use whitelist::*;
pub use withdraw::*;
