//! Core engine — validate at stake time, declare, match and pay at
//! settlement time.

pub mod validator;
pub mod matcher;
pub mod payout;
pub mod declaration;
pub mod settlement;

pub use declaration::{derive_digit, ResultDeclaration};
pub use matcher::{is_winning_bet, is_winning_day_bet};
pub use payout::{compute_win_amount, determine};
pub use settlement::Settler;
pub use validator::{classify_pana, validate_bet_number_format};
