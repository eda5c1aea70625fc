pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, EntryConfig, StoreConfig};
pub use paths::{base_path_override, PathManager};
