//! Build-pipeline helpers.
//!
//! - [`fingerprint`]: stable cache keys derived from environment variables,
//!   plus a small store of recorded fingerprints per build target.
//! - [`layout`]: a framework-free description of a page with a fixed
//!   background image behind scrollable content.

pub mod fingerprint;
pub mod layout;
pub mod utils;
