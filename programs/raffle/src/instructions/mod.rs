pub use admin::*;
pub use check_upkeep::*;
pub use enter_raffle::*;
pub use fulfill_randomness::*;
pub use perform_upkeep::*;

pub mod admin;
pub mod check_upkeep;
pub mod enter_raffle;
pub mod fulfill_randomness;
pub mod perform_upkeep;
