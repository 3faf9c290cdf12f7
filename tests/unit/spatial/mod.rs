pub mod buffer;
pub mod grid;
