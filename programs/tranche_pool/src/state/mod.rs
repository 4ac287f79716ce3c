pub mod access;
pub mod buoy;
pub mod controller;
pub mod depositor;
pub mod ledger;
pub mod mode;
pub mod share_class;
pub mod vault_adaptor;

pub use access::*;
pub use buoy::*;
pub use controller::*;
pub use depositor::*;
pub use ledger::*;
pub use mode::*;
pub use share_class::*;
pub use vault_adaptor::*;
