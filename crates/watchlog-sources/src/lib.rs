pub mod catalog;
pub mod error;
pub mod http;
pub mod store;
pub mod traits;

pub use catalog::{CatalogHit, HttpCatalogClient};
pub use error::{SourceError, StoreError};
pub use store::HttpMovieStore;
pub use traits::{CatalogSearch, MovieStore};
