use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::*;
use crate::events::RaffleEntered;
use crate::state::*;

/// Accounts required to enter the raffle.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The player paying for the entry.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Raffle state account, also receives the payment.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    pub system_program: Program<'info, System>,
}

/// Enters the caller into the current round.
///
/// Steps performed:
/// 1. Check that the raffle is open and the payment covers the entrance fee.
/// 2. Record the entry.
/// 3. Transfer the full payment from the player to the raffle account.
///
/// # Arguments
/// * `ctx` - Context containing EnterRaffle accounts
/// * `amount` - Payment in lamports, overpayment is not refunded
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();

    ctx.accounts.raffle.enter(player, amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.raffle.to_account_info(),
            },
        ),
        amount,
    )?;

    let raffle = &ctx.accounts.raffle;
    msg!("Player entered: {}", player);
    msg!("Pot amount: {}", raffle.pot_amount());

    emit!(RaffleEntered {
        player,
        amount,
        player_count: raffle.num_players() as u32,
        pot_amount: raffle.pot_amount(),
    });

    Ok(())
}
