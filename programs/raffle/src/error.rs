use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    // Entry errors
    #[msg("Payment is below the entrance fee")]
    InsufficientPayment,
    #[msg("Raffle is not open for entries")]
    NotOpen,
    #[msg("Raffle has reached its player limit")]
    RaffleFull,

    // Upkeep errors
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,

    // Randomness errors
    #[msg("Randomness account is not owned by the registered oracle program")]
    IncorrectRandomnessProgram,
    #[msg("Randomness account belongs to a different oracle queue")]
    IncorrectOracleQueue,
    #[msg("Invalid randomness data")]
    InvalidRandomnessData,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not yet resolved")]
    RandomnessNotResolved,
    #[msg("No randomness request is outstanding")]
    NotDrawing,
    #[msg("Randomness does not match the outstanding request")]
    RequestMismatch,
    #[msg("Player list changed while drawing")]
    PopulationMismatch,

    // Payout errors
    #[msg("Winner account does not match the drawn player")]
    WinnerAccountMismatch,
    #[msg("Transfer of the pot to the winner failed")]
    PayoutFailed,

    // Configuration errors
    #[msg("Invalid raffle configuration")]
    InvalidConfig,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
