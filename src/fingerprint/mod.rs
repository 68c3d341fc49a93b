//! Environment fingerprinting for cache invalidation.
//!
//! An environment is serialized to compact JSON (keys sorted unless
//! [`KeyOrder::Insertion`] is requested) and hashed with XXH3-128.

mod digest;
mod env_map;
mod error;
mod stamp;

pub use digest::*;
pub use env_map::*;
pub use error::*;
pub use stamp::*;
