use anchor_lang::prelude::*;

#[event]
pub struct RaffleEntered {
    pub player: Pubkey,
    pub amount: u64,
    pub player_count: u32,
    pub pot_amount: u64,
}

/// Published when a draw is requested. Cranks size the fulfillment
/// transaction from `callback_compute_limit` and wait out
/// `request_confirmations` slots before revealing.
#[event]
pub struct RandomnessRequested {
    pub request: Pubkey,
    pub population: u32,
    pub num_words: u32,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
}

#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub request: Pubkey,
    pub prize: u64,
    pub round: u64,
}
