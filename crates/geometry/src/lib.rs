pub mod buffer;
pub mod coord;

// Geometry crate: coordinate primitives and the pure buffering transform only.
pub use buffer::*;
pub use coord::*;
