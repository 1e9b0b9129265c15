// src/render/mod.rs

pub mod svg;

pub use self::svg::render_partition;
