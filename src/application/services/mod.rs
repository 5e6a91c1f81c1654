//! Application services - List storage and command execution

pub mod blacklist;
pub mod command_service;
pub mod list_store;

pub use blacklist::Blacklist;
pub use command_service::CommandInterpreter;
pub use list_store::ListStore;
