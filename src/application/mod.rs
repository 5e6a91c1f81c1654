//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: List storage and the command interpreter
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing, dispatching, reply formatting

pub mod errors;
pub mod services;
pub mod messaging;
