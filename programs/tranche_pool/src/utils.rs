use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::CONTROLLER_SEED;
use crate::state::Controller;

pub fn get_current_timestamp() -> Result<i64> {
    Ok(Clock::get()?.unix_timestamp)
}

/// Controller signer seeds - the controller PDA owns every vault token account
pub fn get_controller_signer_seeds(bump: &[u8]) -> [&[u8]; 2] {
    [CONTROLLER_SEED, bump]
}

/// Move tokens out of a pool vault token account, signed by the controller PDA.
pub fn transfer_from_pool<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    controller: &Account<'info, Controller>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let bump = [controller.bump];
    let seeds = get_controller_signer_seeds(&bump);
    let signer_seeds = &[seeds.as_slice()];

    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: controller.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );

    token::transfer(cpi_ctx, amount)
}

/// Move tokens from a user into a pool vault token account.
pub fn transfer_to_pool<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);

    token::transfer(cpi_ctx, amount)
}
