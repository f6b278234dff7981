pub mod app;
pub mod target;

pub use app::{AppMetadata, SearchHit};
pub use target::{DownloadTarget, FormatChoice, PackageFormat};
