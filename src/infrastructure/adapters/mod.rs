//! Platform adapters: LINE (webhook + reply API) and a console adapter for local runs

pub mod console;
pub mod line;
