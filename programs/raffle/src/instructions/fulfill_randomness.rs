use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::RaffleError;
use crate::events::WinnerPicked;
use crate::randomness::{random_word, revealed_value, RandomnessCommitment};
use crate::state::*;

/// Accounts required to complete a draw.
///
/// This ensures that:
/// 1. The randomness account is owned by the registered oracle program and is
///    the one the outstanding request committed to.
/// 2. Enough slots have passed and the value has been revealed.
/// 3. The winner account is the player the random value selects.
#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// Account paying for any transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The main raffle state account, also the source of the pot.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// The randomness oracle account providing the revealed value.
    /// CHECK: The account's key and data are validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// Wallet of the drawn player, receives the pot.
    /// CHECK: Compared against the drawn player before any lamports move.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Consumes the revealed randomness, pays the winner and opens the next round.
///
/// Steps:
/// 1. Check the randomness account is owned by the registered oracle program
///    and is the outstanding request.
/// 2. Read the revealed value and select the winner.
/// 3. Reset the round.
/// 4. Move the whole pot to the winner.
///
/// Any failure rolls back the instruction and leaves the raffle drawing.
///
/// # Arguments
/// * `ctx` - Context containing `FulfillRandomness` accounts
pub fn process_fulfill_randomness(ctx: Context<FulfillRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let request = ctx.accounts.randomness_account_data.key();

    let commitment = RandomnessCommitment::load(
        &ctx.accounts.randomness_account_data,
        &ctx.accounts.raffle.config,
    )?;
    commitment.require_provider(&ctx.accounts.raffle.config)?;
    ctx.accounts.raffle.verify_fulfillment(request, clock.slot)?;

    let revealed_random_value = revealed_value(&ctx.accounts.randomness_account_data, &clock)?;
    let word = random_word(&revealed_random_value);

    msg!("Randomness result: {}", word);
    msg!("Num players: {}", ctx.accounts.raffle.num_players());

    ctx.accounts
        .raffle
        .confirm_winner(request, word, clock.slot, ctx.accounts.winner.key())?;

    let settlement =
        ctx.accounts
            .raffle
            .settle_draw(request, word, clock.unix_timestamp, clock.slot)?;

    pay_out(
        &ctx.accounts.raffle.to_account_info(),
        &ctx.accounts.winner.to_account_info(),
        settlement.prize,
    )?;

    msg!("Winner: {}", settlement.winner);
    msg!("Prize: {}", settlement.prize);

    emit!(WinnerPicked {
        winner: settlement.winner,
        request,
        prize: settlement.prize,
        round: ctx.accounts.raffle.rounds_completed,
    });

    Ok(())
}

fn pay_out<'info>(from: &AccountInfo<'info>, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
    let moved = from.lamports().checked_sub(amount).and_then(|from_balance| {
        to.lamports()
            .checked_add(amount)
            .map(|to_balance| (from_balance, to_balance))
    });

    let Some((from_balance, to_balance)) = moved else {
        msg!("Payout of {} lamports to {} failed", amount, to.key());
        return Err(RaffleError::PayoutFailed.into());
    };

    **from
        .try_borrow_mut_lamports()
        .map_err(|_| RaffleError::PayoutFailed)? = from_balance;
    **to.try_borrow_mut_lamports()
        .map_err(|_| RaffleError::PayoutFailed)? = to_balance;

    Ok(())
}
