#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;
use state::*;

/// Program-wide constants: seeds, player limit and request parameters.
pub mod constants;

/// Custom error types returned by the instructions.
pub mod error;

/// Events emitted on entry, draw request and payout.
pub mod events;

/// Instruction handlers and their account contexts.
pub mod instructions;

/// Conversion of revealed randomness into a winning entry.
pub mod randomness;

/// The `Raffle` account and its round state machine.
pub mod state;

declare_id!("5TmRea6emXjpAHeuWMsxbc4yvCVJQYfHKX9MKJrwo5Vd");

#[program]
pub mod autonomous_raffle {
    use super::*;

    pub fn initialize_raffle(ctx: Context<InitializeRaffle>, config: RaffleConfig) -> Result<()> {
        process_initialize_raffle(ctx, config)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        process_enter_raffle(ctx, amount)
    }

    /// Read-only check for schedulers, answered through return data.
    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
        process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        process_perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_randomness(ctx: Context<FulfillRandomness>) -> Result<()> {
        process_fulfill_randomness(ctx)
    }
}
