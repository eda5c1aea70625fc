pub mod api;
pub mod client;

pub use api::CatalogHit;
pub use client::HttpCatalogClient;
