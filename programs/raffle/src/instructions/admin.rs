use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

/// Accounts required to initialize the raffle.
/// This sets up the singleton raffle account that tracks rounds and holds the pot.
#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The Raffle state account.
    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the raffle with its fixed configuration and opens the first round.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeRaffle accounts
/// * `config` - Entrance fee, interval and oracle parameters
pub fn process_initialize_raffle(
    ctx: Context<InitializeRaffle>,
    config: RaffleConfig,
) -> Result<()> {
    config.validate()?;

    let clock = Clock::get()?;
    ctx.accounts.raffle.set_inner(Raffle::new(
        config,
        clock.unix_timestamp,
        ctx.bumps.raffle,
    ));

    msg!("Raffle initialized");
    msg!("Entrance fee: {}", config.entrance_fee);
    msg!("Interval: {}", config.interval);
    msg!("Oracle queue: {}", config.oracle_queue);
    msg!("Request confirmations: {}", config.request_confirmations);

    Ok(())
}
