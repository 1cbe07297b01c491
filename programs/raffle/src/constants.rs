use anchor_lang::prelude::*;

/// Seed of the singleton raffle PDA. The account also holds the pot.
#[constant]
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Upper bound on entries per round, fixes the account size.
pub const MAX_PLAYERS: usize = 200;

/// Random words consumed per draw.
#[constant]
pub const NUM_WORDS: u32 = 1;

/// Opaque payload handed back by `check_upkeep`. Nothing is carried today.
pub const EMPTY_PERFORM_DATA: &[u8] = &[];
