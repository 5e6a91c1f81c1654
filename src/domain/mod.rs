//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Category, Command, Outcome, messages)
//! - Traits: Abstractions for infrastructure (ListBackend, ReplySender, Chooser)

pub mod entities;
pub mod traits;
