use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::RandomnessRequested;
use crate::randomness::RandomnessCommitment;
use crate::state::*;

/// Accounts required to start a draw.
///
/// Anyone may call this. The raffle re-derives whether a draw is due from its
/// own state, so the caller's identity and `check_upkeep` result do not matter.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// Account paying for any transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The main raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// Randomness account committed for this draw. Its key becomes the request id.
    /// CHECK: The account's owner and data are validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Locks the round and requests randomness for it.
///
/// Steps:
/// 1. Re-check the upkeep conditions against current state.
/// 2. Verify the randomness account is a fresh commitment on the configured queue.
/// 3. Switch the raffle to drawing, keyed by the randomness account.
///
/// # Arguments
/// * `ctx` - Context containing `PerformUpkeep` accounts
/// * `_perform_data` - Payload returned by `check_upkeep`, not trusted
pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;
    let randomness_info = &ctx.accounts.randomness_account_data;

    raffle.require_upkeep_needed(clock.unix_timestamp)?;

    let commitment = RandomnessCommitment::load(randomness_info, &raffle.config)?;
    raffle.request_draw(&commitment, clock.unix_timestamp, clock.slot)?;

    let request = commitment.key;
    let population = raffle.num_players() as u32;
    msg!("Requested randomness: {}", request);
    msg!("Players in draw: {}", population);

    emit!(RandomnessRequested {
        request,
        population,
        num_words: NUM_WORDS,
        request_confirmations: raffle.config.request_confirmations,
        callback_compute_limit: raffle.config.callback_compute_limit,
    });

    Ok(())
}
