//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod price;
pub mod product;
pub mod username;

pub use category::Category;
pub use email::{Email, EmailError};
pub use price::Price;
pub use product::Product;
pub use username::{Username, UsernameError};
