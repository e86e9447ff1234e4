//! Usage ledger domain module.

pub mod model;
pub mod repository;

pub use model::{Activity, CreditBalance, RECENT_ACTIVITY_CAP};
pub use repository::LedgerRepository;
