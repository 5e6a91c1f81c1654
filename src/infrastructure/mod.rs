//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: List persistence (flat files, in-memory)
//! - Adapters: Platform integrations (LINE, console)

pub mod config;
pub mod storage;
pub mod adapters;
