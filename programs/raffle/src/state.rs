use anchor_lang::prelude::*;
use solana_program::clock::{Slot, UnixTimestamp};

use crate::constants::{EMPTY_PERFORM_DATA, MAX_PLAYERS, NUM_WORDS};
use crate::error::RaffleError;
use crate::randomness::{winner_index, RandomnessCommitment};

/// Parameters fixed when the raffle is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RaffleConfig {
    /// Minimum payment (in lamports) for one entry.
    pub entrance_fee: u64,

    /// Minimum number of seconds between draws.
    pub interval: i64,

    /// Randomness queue the raffle requests draws from.
    pub oracle_queue: Pubkey,

    /// Program that owns valid randomness accounts.
    pub oracle_program: Pubkey,

    /// Compute units the crank attaches to the fulfillment transaction.
    pub callback_compute_limit: u32,

    /// Slots that must pass between a request and its fulfillment.
    pub request_confirmations: u16,
}

impl RaffleConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.entrance_fee > 0, RaffleError::InvalidConfig);
        require!(self.interval > 0, RaffleError::InvalidConfig);
        require!(
            self.oracle_queue != Pubkey::default(),
            RaffleError::InvalidConfig
        );
        require!(
            self.oracle_program != Pubkey::default(),
            RaffleError::InvalidConfig
        );
        Ok(())
    }
}

/// Lifecycle of a round. The outstanding request only exists while drawing.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RaffleState {
    /// Accepting entries.
    Open,

    /// A randomness request is in flight, entries are blocked.
    Drawing {
        /// Randomness account committed for this draw.
        request: Pubkey,
        /// Number of entries eligible for selection.
        population: u32,
        /// Slot the request was made in.
        requested_slot: u64,
    },
}

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Fee, interval and oracle parameters fixed at initialization.
    pub config: RaffleConfig,

    /// Whether the round is open or waiting on a randomness request.
    pub state: RaffleState,

    /// Entries of the current round in the order they were made.
    /// A wallet appears once per entry.
    #[max_len(MAX_PLAYERS)]
    pub players: Vec<Pubkey>,

    /// UNIX timestamp of initialization or of the last completed draw.
    pub last_timestamp: i64,

    /// Lamports collected this round. Held by this account on top of rent.
    pub pot_amount: u64,

    /// Winner of the last completed draw.
    pub recent_winner: Option<Pubkey>,

    /// Randomness account of the most recent draw request.
    pub recent_request: Option<Pubkey>,

    /// Number of draws paid out so far.
    pub rounds_completed: u64,
}

/// Result of the read-only upkeep check.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub perform_data: Vec<u8>,
}

/// Outcome of a completed draw, consumed by the payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub winner: Pubkey,
    pub prize: u64,
}

impl Raffle {
    pub fn new(config: RaffleConfig, now: UnixTimestamp, bump: u8) -> Self {
        Self {
            bump,
            config,
            state: RaffleState::Open,
            players: Vec::new(),
            last_timestamp: now,
            pot_amount: 0,
            recent_winner: None,
            recent_request: None,
            rounds_completed: 0,
        }
    }

    /// Records one entry for `player`. Any payment at or above the entrance
    /// fee is accepted and kept whole.
    pub fn enter(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(self.is_open(), RaffleError::NotOpen);
        require!(
            amount >= self.config.entrance_fee,
            RaffleError::InsufficientPayment
        );
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        let pot_amount = self
            .pot_amount
            .checked_add(amount)
            .ok_or(RaffleError::MathOverflow)?;

        self.players.push(player);
        self.pot_amount = pot_amount;

        Ok(())
    }

    /// Whether a draw may start at `now`. Never mutates.
    pub fn upkeep_needed(&self, now: UnixTimestamp) -> bool {
        let is_open = self.is_open();
        let time_passed = now.saturating_sub(self.last_timestamp) >= self.config.interval;
        let has_players = !self.players.is_empty();
        let has_balance = self.pot_amount > 0;

        is_open && time_passed && has_players && has_balance
    }

    pub fn check_upkeep(&self, now: UnixTimestamp) -> UpkeepCheck {
        UpkeepCheck {
            upkeep_needed: self.upkeep_needed(now),
            perform_data: EMPTY_PERFORM_DATA.to_vec(),
        }
    }

    /// Fails with `UpkeepNotNeeded`, logging a snapshot of the round, unless
    /// a draw may start at `now`.
    pub fn require_upkeep_needed(&self, now: UnixTimestamp) -> Result<()> {
        if !self.upkeep_needed(now) {
            msg!("Pot amount: {}", self.pot_amount);
            msg!("Num players: {}", self.players.len());
            msg!("Raffle state: {:?}", self.state);
            msg!(
                "Seconds since last draw: {}",
                now.saturating_sub(self.last_timestamp)
            );
            return Err(RaffleError::UpkeepNotNeeded.into());
        }
        Ok(())
    }

    /// Locks the round behind `request`. The entry count at this point is
    /// the population the draw selects from.
    pub fn begin_draw(&mut self, request: Pubkey, now: UnixTimestamp, slot: Slot) -> Result<()> {
        self.require_upkeep_needed(now)?;

        self.state = RaffleState::Drawing {
            request,
            population: self.players.len() as u32,
            requested_slot: slot,
        };
        self.recent_request = Some(request);

        Ok(())
    }

    /// Validates `commitment` as a draw request and locks the round behind it.
    /// A rejected request leaves the round untouched.
    pub fn request_draw(
        &mut self,
        commitment: &RandomnessCommitment,
        now: UnixTimestamp,
        slot: Slot,
    ) -> Result<()> {
        self.require_upkeep_needed(now)?;
        commitment.require_fresh(&self.config, slot)?;
        self.begin_draw(commitment.key, now, slot)
    }

    /// Checks a delivery against the outstanding request and returns the
    /// population of the draw.
    pub fn verify_fulfillment(&self, request: Pubkey, slot: Slot) -> Result<u32> {
        let (pending, population, requested_slot) = match self.state {
            RaffleState::Open => return Err(RaffleError::NotDrawing.into()),
            RaffleState::Drawing {
                request,
                population,
                requested_slot,
            } => (request, population, requested_slot),
        };

        if request != pending {
            msg!("Outstanding request: {}", pending);
            msg!("Delivered request: {}", request);
            return Err(RaffleError::RequestMismatch.into());
        }

        let confirmations = slot.saturating_sub(requested_slot);
        if confirmations < self.config.request_confirmations as u64 {
            msg!("Requested slot: {}", requested_slot);
            msg!("Current slot: {}", slot);
            return Err(RaffleError::RandomnessNotResolved.into());
        }

        Ok(population)
    }

    /// Picks the winner for `request` from `random_word` without touching state.
    pub fn draw_winner(&self, request: Pubkey, random_word: u64, slot: Slot) -> Result<Pubkey> {
        let population = self.verify_fulfillment(request, slot)?;

        if population as usize != self.players.len() {
            return Err(RaffleError::PopulationMismatch.into());
        }

        winner_index(random_word, population)
            .and_then(|index| self.players.get(index).copied())
            .ok_or_else(|| RaffleError::PopulationMismatch.into())
    }

    /// Picks the winner and fails with `WinnerAccountMismatch` unless
    /// `winner_account` is the drawn player.
    pub fn confirm_winner(
        &self,
        request: Pubkey,
        random_word: u64,
        slot: Slot,
        winner_account: Pubkey,
    ) -> Result<Pubkey> {
        let winner = self.draw_winner(request, random_word, slot)?;

        if winner_account != winner {
            msg!("Drawn player: {}", winner);
            msg!("Winner account: {}", winner_account);
            return Err(RaffleError::WinnerAccountMismatch.into());
        }
        Ok(winner)
    }

    /// Completes the draw and reopens the raffle. The caller moves
    /// `Settlement::prize` lamports to `Settlement::winner`.
    pub fn settle_draw(
        &mut self,
        request: Pubkey,
        random_word: u64,
        now: UnixTimestamp,
        slot: Slot,
    ) -> Result<Settlement> {
        let winner = self.draw_winner(request, random_word, slot)?;
        let rounds_completed = self
            .rounds_completed
            .checked_add(1)
            .ok_or(RaffleError::MathOverflow)?;
        let prize = self.pot_amount;

        self.players.clear();
        self.pot_amount = 0;
        self.state = RaffleState::Open;
        self.last_timestamp = now;
        self.recent_winner = Some(winner);
        self.rounds_completed = rounds_completed;

        Ok(Settlement { winner, prize })
    }

    pub fn is_open(&self) -> bool {
        self.state == RaffleState::Open
    }

    pub fn raffle_state(&self) -> RaffleState {
        self.state
    }

    pub fn entrance_fee(&self) -> u64 {
        self.config.entrance_fee
    }

    pub fn interval(&self) -> i64 {
        self.config.interval
    }

    pub fn player(&self, index: usize) -> Option<Pubkey> {
        self.players.get(index).copied()
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn pot_amount(&self) -> u64 {
        self.pot_amount
    }

    pub fn recent_winner(&self) -> Option<Pubkey> {
        self.recent_winner
    }

    pub fn recent_request(&self) -> Option<Pubkey> {
        self.recent_request
    }

    pub fn pending_request(&self) -> Option<Pubkey> {
        match self.state {
            RaffleState::Open => None,
            RaffleState::Drawing { request, .. } => Some(request),
        }
    }

    pub fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    pub fn num_words(&self) -> u32 {
        NUM_WORDS
    }

    pub fn request_confirmations(&self) -> u16 {
        self.config.request_confirmations
    }
}
