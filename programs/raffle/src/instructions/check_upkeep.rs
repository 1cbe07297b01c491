use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

/// Accounts read by the upkeep check. Nothing is writable.
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,
}

/// Reports whether `perform_upkeep` would start a draw right now.
/// Meant to be simulated by schedulers; safe to call at any cadence.
pub fn process_check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.raffle.check_upkeep(clock.unix_timestamp))
}
