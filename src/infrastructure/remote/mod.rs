pub mod download;
pub mod github;
pub mod http_client;
pub mod platform;
pub mod zulu;

pub use download::download_to_file;
pub use github::{AssetInfo, GitHubReleaseClient, ReleaseInfo, ReleaseSource};
pub use http_client::HttpClient;
pub use platform::Platform;
pub use zulu::{AzulMetadataClient, VendorPackageSource};
