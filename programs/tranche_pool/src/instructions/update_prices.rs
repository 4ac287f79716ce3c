use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::PricesUpdated;
use crate::state::*;
use crate::utils::get_current_timestamp;

#[derive(Accounts)]
pub struct UpdatePrices<'info> {
    #[account(
        mut,
        seeds = [BUOY_SEED, buoy.controller.as_ref()],
        bump = buoy.bump,
    )]
    pub buoy: Account<'info, Buoy>,

    pub authority: Signer<'info>,
}

pub fn update_prices(
    ctx: Context<UpdatePrices>,
    prices: [u128; N_COINS],
    virtual_price: u128,
) -> Result<()> {
    let now = get_current_timestamp()?;
    let authority = ctx.accounts.authority.key();
    let buoy = &mut ctx.accounts.buoy;

    buoy.update_prices(&authority, prices, virtual_price, now)?;

    emit!(PricesUpdated {
        buoy: buoy.key(),
        prices,
        virtual_price,
        timestamp: now,
    });

    msg!("Prices updated: {:?}, virtual price {}", prices, virtual_price);

    Ok(())
}
