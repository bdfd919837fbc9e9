//! Wishlist module: three-layer architecture (domain, store, service).
//!
//! `WishlistService` validates and normalises caller input, then delegates to a
//! `ListStore` that owns the `list_id -> items` map.

pub mod domain;
pub mod memory;
pub mod service;
pub mod store;

pub use domain::{ItemMode, ListId};
pub use memory::InMemoryListStore;
pub use service::WishlistService;
pub use store::ListStore;
