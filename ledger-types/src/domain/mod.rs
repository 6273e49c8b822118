//! Domain models for the ledger service.

pub mod account;
pub mod clock;
pub mod contact;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountId};
pub use clock::{Clock, FixedClock, SystemClock};
pub use contact::{is_valid_email, is_valid_mobile_number};
pub use transaction::{OperationType, Transaction, TransactionId};
pub use user::{User, UserId};
