//! Domain entities - Core business objects with no external dependencies

pub mod category;
pub mod command;
pub mod message;
pub mod outcome;

pub use category::{Category, BLACKLIST_KEY};
pub use command::{Command, Verb};
pub use message::{InboundMessage, MenuButton, MenuPayload, OutboundMessage};
pub use outcome::Outcome;
