use anchor_lang::prelude::*;
use crate::error::*;

/// Pool operating mode.
///
/// Normal -> Paused -> Emergency -> Normal, with Normal -> Emergency allowed
/// directly (entering emergency pauses the pool at the same time).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SystemMode {
    #[default]
    Normal,
    Paused,
    Emergency,
}

impl SystemMode {
    pub const LEN: usize = 1;

    pub fn pause(self) -> PoolResult<Self> {
        match self {
            SystemMode::Normal => Ok(SystemMode::Paused),
            _ => Err(PoolError::InvalidState),
        }
    }

    pub fn emergency(self) -> PoolResult<Self> {
        match self {
            SystemMode::Normal | SystemMode::Paused => Ok(SystemMode::Emergency),
            SystemMode::Emergency => Err(PoolError::InvalidState),
        }
    }

    pub fn unpause(self) -> PoolResult<Self> {
        match self {
            SystemMode::Paused | SystemMode::Emergency => Ok(SystemMode::Normal),
            SystemMode::Normal => Err(PoolError::InvalidState),
        }
    }

    pub fn is_paused(self) -> bool {
        self != SystemMode::Normal
    }

    pub fn is_emergency(self) -> bool {
        self == SystemMode::Emergency
    }

    pub fn ensure_deposits_allowed(self) -> PoolResult<()> {
        if self.is_paused() {
            return Err(PoolError::DepositsHalted);
        }
        Ok(())
    }
}
