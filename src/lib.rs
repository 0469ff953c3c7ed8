// 核心模块
pub mod cli;
pub mod core;
pub mod environments;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use error::*;
