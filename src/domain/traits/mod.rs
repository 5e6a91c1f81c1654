//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod chooser;
pub mod store;

pub use bot::{BotInfo, ReplySender};
pub use chooser::{Chooser, ThreadRngChooser};
pub use store::ListBackend;
