//! dinner-bot: a LINE bot that keeps categorized restaurant lists and
//! draws a random place to eat.

pub mod domain;
pub mod application;
pub mod infrastructure;
