//! Bot domain module.

pub mod model;
pub mod repository;

pub use model::{
    Bot, BotKind, BotPatch, BotStatus, ExecutionReceipt, ExecutionStatus, NewBot, derive_domain,
};
pub use repository::BotRepository;
