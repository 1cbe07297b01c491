use anchor_lang::prelude::*;
use solana_program::clock::Slot;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::error::RaffleError;
use crate::state::RaffleConfig;

/// The fields of a randomness account that decide whether the raffle
/// accepts it as a draw request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomnessCommitment {
    /// Address of the randomness account, used as the request id.
    pub key: Pubkey,
    pub owner: Pubkey,
    pub queue: Pubkey,
    pub seed_slot: Slot,
}

impl RandomnessCommitment {
    /// Reads a randomness account. The owner is checked before any data is parsed.
    pub fn load(info: &AccountInfo, config: &RaffleConfig) -> Result<Self> {
        require_oracle_program(info.owner, config)?;

        let randomness_data = RandomnessAccountData::parse(info.data.borrow())
            .map_err(|_| RaffleError::InvalidRandomnessData)?;

        Ok(Self {
            key: *info.key,
            owner: *info.owner,
            queue: randomness_data.queue,
            seed_slot: randomness_data.seed_slot,
        })
    }

    /// Fails unless the account belongs to the registered program and queue.
    pub fn require_provider(&self, config: &RaffleConfig) -> Result<()> {
        require_oracle_program(&self.owner, config)?;
        require_keys_eq!(
            self.queue,
            config.oracle_queue,
            RaffleError::IncorrectOracleQueue
        );
        Ok(())
    }

    /// Fails unless the account is a registered commitment seeded in the previous slot.
    pub fn require_fresh(&self, config: &RaffleConfig, slot: Slot) -> Result<()> {
        self.require_provider(config)?;

        if self.seed_slot != slot.saturating_sub(1) {
            msg!("Seed slot: {}", self.seed_slot);
            msg!("Current slot: {}", slot);
            return Err(RaffleError::RandomnessAlreadyRevealed.into());
        }
        Ok(())
    }
}

pub fn require_oracle_program(owner: &Pubkey, config: &RaffleConfig) -> Result<()> {
    require_keys_eq!(
        *owner,
        config.oracle_program,
        RaffleError::IncorrectRandomnessProgram
    );
    Ok(())
}

/// Value revealed for the current slot. The account must already have passed
/// `RandomnessCommitment::load`.
pub fn revealed_value(info: &AccountInfo, clock: &Clock) -> Result<[u8; 32]> {
    let randomness_data = RandomnessAccountData::parse(info.data.borrow())
        .map_err(|_| RaffleError::InvalidRandomnessData)?;

    randomness_data
        .get_value(clock)
        .map_err(|_| RaffleError::RandomnessNotResolved.into())
}

/// Reads the random word from a revealed 32-byte value.
/// Uses the first 8 bytes as a little-endian u64.
pub fn random_word(value: &[u8; 32]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&value[..8]);
    u64::from_le_bytes(bytes)
}

/// Maps a random word onto an entry index with a plain modulo.
/// Modulo bias is accepted. Returns `None` for an empty population.
pub fn winner_index(random_word: u64, population: u32) -> Option<usize> {
    if population == 0 {
        return None;
    }

    Some((random_word % population as u64) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn config() -> RaffleConfig {
        RaffleConfig {
            entrance_fee: 100,
            interval: 30,
            oracle_queue: Pubkey::new_unique(),
            oracle_program: Pubkey::new_unique(),
            callback_compute_limit: 200_000,
            request_confirmations: 3,
        }
    }

    fn commitment(config: &RaffleConfig, seed_slot: Slot) -> RandomnessCommitment {
        RandomnessCommitment {
            key: Pubkey::new_unique(),
            owner: config.oracle_program,
            queue: config.oracle_queue,
            seed_slot,
        }
    }

    fn error_name<T: std::fmt::Debug>(result: Result<T>) -> String {
        match result {
            Err(Error::AnchorError(e)) => e.error_name.clone(),
            other => panic!("expected an anchor error, got {:?}", other),
        }
    }

    #[test]
    fn test_random_word_is_little_endian() {
        let mut value = [0u8; 32];
        value[0] = 7;
        value[1] = 1;
        value[8] = 0xFF; // outside the word

        assert_eq!(random_word(&value), 263);
    }

    #[test]
    fn test_winner_index_bounds() {
        assert_eq!(winner_index(7, 3), Some(1));
        assert_eq!(winner_index(u64::MAX, 10), Some(5));
        assert_eq!(winner_index(42, 1), Some(0));
        assert_eq!(winner_index(42, 0), None);
    }

    #[test]
    fn test_fresh_commitment_accepted() {
        let config = config();
        assert!(commitment(&config, 99).require_fresh(&config, 100).is_ok());
    }

    #[test]
    fn test_commitment_from_other_program_rejected() {
        let config = config();
        let foreign = RandomnessCommitment {
            owner: Pubkey::new_unique(),
            ..commitment(&config, 99)
        };

        assert_eq!(
            error_name(foreign.require_fresh(&config, 100)),
            "IncorrectRandomnessProgram"
        );
        assert_eq!(
            error_name(foreign.require_provider(&config)),
            "IncorrectRandomnessProgram"
        );
    }

    #[test]
    fn test_commitment_from_other_queue_rejected() {
        let config = config();
        let other_queue = RandomnessCommitment {
            queue: Pubkey::new_unique(),
            ..commitment(&config, 99)
        };

        assert_eq!(
            error_name(other_queue.require_fresh(&config, 100)),
            "IncorrectOracleQueue"
        );
    }

    #[test]
    fn test_stale_commitment_rejected() {
        let config = config();

        assert_eq!(
            error_name(commitment(&config, 97).require_fresh(&config, 100)),
            "RandomnessAlreadyRevealed"
        );
        assert_eq!(
            error_name(commitment(&config, 100).require_fresh(&config, 100)),
            "RandomnessAlreadyRevealed"
        );
    }

    #[test]
    fn test_load_checks_owner_before_parsing() {
        let config = config();
        let key = Pubkey::new_unique();
        let foreign_owner = Pubkey::new_unique();
        let mut lamports = 1_000_000u64;
        let mut data = [0u8; 8];
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &foreign_owner,
            false,
            0,
        );

        assert_eq!(
            error_name(RandomnessCommitment::load(&info, &config)),
            "IncorrectRandomnessProgram"
        );
    }
}
