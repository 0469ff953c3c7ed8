pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::CommandHandler;
pub use output::{OutputFormat, OutputFormatter, FORMATTER};
