// src/tessellation/mod.rs
pub mod builder;
pub mod reconstruct;

pub use builder::*;
pub use reconstruct::*;
