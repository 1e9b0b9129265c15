// src/clip/mod.rs
pub mod buffer;
pub mod clipper;

pub use buffer::*;
pub use clipper::*;
