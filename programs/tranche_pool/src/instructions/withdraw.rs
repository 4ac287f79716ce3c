use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use crate::constants::*;
use crate::error::*;
use crate::events::Withdrawn;
use crate::instructions::pool_accounts::*;
use crate::state::*;
use crate::utils::{get_current_timestamp, transfer_from_pool};
use crate::withdrawal::{PoolSnapshot, WithdrawalPlan};

#[derive(Accounts)]
pub struct Withdraw<'info> {
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

impl<'info> Withdraw<'info> {
    fn validate(&self) -> Result<()> {
        self.vaults.validate(&self.controller)?;
        self.user_tokens.validate(&self.vaults, &self.authority.key())
    }

    fn snapshot(&self) -> PoolSnapshot<'_, Buoy> {
        PoolSnapshot::new(&self.controller, &self.ledger, &*self.buoy, self.vaults.assets())
    }

    /// Burn the shares, release the vault liquidity and pay the user.
    fn apply(&mut self, class: ShareClass, plan: WithdrawalPlan) -> Result<()> {
        let now = get_current_timestamp()?;

        self.ledger.record_withdrawal(class, plan.shares_burned, plan.net_usd)?;
        self.depositor.burn(class, plan.shares_burned, plan.net_usd)?;

        for (index, amount) in plan.token_amounts.iter().enumerate() {
            if *amount == 0 {
                continue;
            }
            self.vaults.adaptor_mut(index)?.withdraw(*amount)?;
            transfer_from_pool(
                &self.token_program,
                self.vaults.token_account(index)?,
                self.user_tokens.token_account(index)?,
                &self.controller,
                *amount,
            )?;
        }

        emit!(Withdrawn {
            controller: self.controller.key(),
            depositor: self.depositor.key(),
            class,
            route: plan.route,
            mode: self.controller.mode,
            token_amounts: plan.token_amounts,
            gross_usd: plan.gross_usd,
            fee_usd: plan.fee_usd,
            net_usd: plan.net_usd,
            shares_burned: plan.shares_burned,
            timestamp: now,
        });

        msg!(
            "Withdrew {} USD from {:?} ({} fee), burned {} shares",
            plan.net_usd,
            class,
            plan.fee_usd,
            plan.shares_burned
        );

        Ok(())
    }
}

pub fn withdraw_by_lp_token(
    ctx: Context<Withdraw>,
    class: ShareClass,
    lp_amount: u128,
    min_amounts: [u64; N_COINS],
) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.validate()?;

    let held = accounts.depositor.shares(class);
    let plan = accounts
        .snapshot()
        .plan_withdraw_by_lp_token(class, held, lp_amount, &min_amounts)?;

    accounts.apply(class, plan)
}

pub fn withdraw_by_stablecoin(
    ctx: Context<Withdraw>,
    class: ShareClass,
    index: u8,
    usd_amount: u128,
    min_amount: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.validate()?;

    let held = accounts.depositor.shares(class);
    let plan = accounts
        .snapshot()
        .plan_withdraw_by_stablecoin(class, held, index as usize, usd_amount, min_amount)?;

    accounts.apply(class, plan)
}

pub fn withdraw_all_single(
    ctx: Context<Withdraw>,
    class: ShareClass,
    index: u8,
    min_amount: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.validate()?;

    let held = accounts.depositor.shares(class);
    let plan = accounts
        .snapshot()
        .plan_withdraw_all_single(class, held, index as usize, min_amount)?;

    accounts.apply(class, plan)
}
