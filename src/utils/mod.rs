mod format;
mod hash;

pub use format::*;
pub use hash::*;
