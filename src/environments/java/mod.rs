pub mod activator;
pub mod installer;
pub mod registry;

pub use activator::{Activation, Activator};
pub use installer::{InstallOutcome, JdkInstaller};
pub use registry::{disk_usage, format_size, LocalRegistry};
