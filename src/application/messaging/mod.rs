//! Message handling - Parsing, command dispatch and reply rendering

pub mod dispatcher;
pub mod formatter;
pub mod parser;

pub use dispatcher::MessageDispatcher;
pub use formatter::ReplyFormatter;
pub use parser::CommandParser;
