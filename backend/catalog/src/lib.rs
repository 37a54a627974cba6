//! # Catalog
//!
//! Melon records, the read-only catalog that holds them, and the cart logic built on top.
//!
//! ## Data Flow
//!
//! - The catalog is loaded once at startup, either from the embedded seed or a JSON file
//! - A cart is a plain `id -> quantity` mapping owned by whoever stores the session
//! - Adding to a cart never consults the catalog, so unknown ids are accepted
//! - Viewing a cart resolves every id against the catalog and fails on the first miss
//!
//! ## Seed Format
//!
//! JSON array of melons, prices as strings to keep them exact.
//! ```json
//! [{ "id": "cren", "melon_type": "Crenshaw", "common_name": "Crenshaw", "price": "2.00",
//!    "image_url": "/static/img/crenshaw.jpg", "color": "yellow", "seedless": false,
//!    "description": "..." }]
//! ```
pub mod cart;
pub mod error;
pub mod melon;
pub mod store;

pub use cart::{Cart, CartView, LineItem, add_to_cart, build_cart_view};
pub use error::CatalogError;
pub use melon::{Melon, format_price};
pub use store::Catalog;
