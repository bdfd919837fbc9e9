//! Service layer for the wishlist backend.
//! - Keeps list storage behind the `ListStore` trait.
//! - Validation and item normalisation live in `wishlist::domain`.
//! - Handlers in the `server` crate only translate HTTP to `WishlistService` calls.

pub mod errors;
pub mod wishlist;
