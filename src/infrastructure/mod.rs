pub mod catalog;
pub mod config;
pub mod installer;
pub mod remote;
pub mod shell;

pub use catalog::*;
pub use config::*;
pub use remote::*;
pub use shell::*;
