mod client;
mod types;

pub use client::{ProductsClient, PRODUCTS_ENDPOINT};
pub use types::{Product, ProductRequest};
