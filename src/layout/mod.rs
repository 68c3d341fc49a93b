//! Fixed background layout: a full-viewport image layer behind a
//! scrollable, width-constrained content column.

mod asset;
mod node;
mod render;
mod style;
mod view;

pub use asset::*;
pub use node::*;
pub use render::*;
pub use style::*;
pub use view::*;
