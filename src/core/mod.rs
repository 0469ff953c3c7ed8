pub mod constants;
pub mod identifier;
pub mod resolver;

pub use identifier::VersionRoute;
pub use resolver::VersionResolver;
