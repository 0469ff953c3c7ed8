pub mod archive;
pub mod utils;

pub use archive::{extract, ArchiveFormat};
pub use utils::{create_progress_bar, progress_callback};
