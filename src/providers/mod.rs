// src/providers/mod.rs

pub mod location;
pub mod territory;

pub use location::{InMemoryLocations, LocationProvider};
pub use territory::{InMemoryTerritory, TerritoryProvider};
