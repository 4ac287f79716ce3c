use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use crate::constants::*;
use crate::error::*;
use crate::events::Deposited;
use crate::instructions::pool_accounts::*;
use crate::oracle::PriceOracle;
use crate::state::*;
use crate::utils::{get_current_timestamp, transfer_to_pool};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        seeds = [CONTROLLER_SEED],
        bump = controller.bump,
    )]
    pub controller: Account<'info, Controller>,

    #[account(
        mut,
        constraint = ledger.key() == controller.ledger @ PoolError::InvalidConfig,
    )]
    pub ledger: Account<'info, PnlLedger>,

    #[account(
        constraint = buoy.key() == controller.buoy @ PoolError::InvalidConfig,
    )]
    pub buoy: Account<'info, Buoy>,

    #[account(
        mut,
        seeds = [DEPOSITOR_SEED, controller.key().as_ref(), authority.key().as_ref()],
        bump = depositor.bump,
        constraint = depositor.authority == authority.key() @ PoolError::Unauthorized,
    )]
    pub depositor: Account<'info, Depositor>,

    pub vaults: PoolVaults<'info>,

    pub user_tokens: UserTokenAccounts<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit(
    ctx: Context<Deposit>,
    class: ShareClass,
    amounts: [u64; N_COINS],
    min_lp: u128,
) -> Result<()> {
    let now = get_current_timestamp()?;
    let accounts = ctx.accounts;

    accounts.controller.mode.ensure_deposits_allowed()?;
    accounts.vaults.validate(&accounts.controller)?;
    accounts.user_tokens.validate(&accounts.vaults, &accounts.authority.key())?;

    if amounts.iter().all(|a| *a == 0) {
        return Err(PoolError::InvalidAmount.into());
    }

    let usd_amount = accounts.buoy.stable_to_usd(&amounts, true)?;
    let lp_amount = accounts.buoy.usd_to_lp(usd_amount)?;
    if lp_amount < min_lp {
        return Err(PoolError::SlippageExceeded.into());
    }

    // Transfer tokens from user to the vaults FIRST
    for (index, amount) in amounts.iter().enumerate() {
        transfer_to_pool(
            &accounts.token_program,
            accounts.user_tokens.token_account(index)?,
            accounts.vaults.token_account(index)?,
            &accounts.authority,
            *amount,
        )?;
        accounts.vaults.adaptor_mut(index)?.deposit(*amount)?;
    }

    let shares = accounts
        .ledger
        .record_deposit(class, usd_amount, accounts.controller.utilisation_ratio_limit)?;
    accounts.depositor.mint(class, shares, usd_amount)?;

    emit!(Deposited {
        controller: accounts.controller.key(),
        depositor: accounts.depositor.key(),
        class,
        token_amounts: amounts,
        usd_amount,
        lp_amount,
        shares_minted: shares,
        timestamp: now,
    });

    msg!("Deposited {} USD into {:?}, received {} shares", usd_amount, class, shares);

    Ok(())
}
