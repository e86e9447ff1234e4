//! Session domain module.

pub mod message;
pub mod model;
pub mod repository;

pub use message::{FileMeta, Message, Sender};
pub use model::{DEFAULT_SESSION_TITLE, Session, TITLE_PREVIEW_CHARS};
pub use repository::SessionRepository;
