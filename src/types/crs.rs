// src/types/crs.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag for the projected coordinate reference system of a dataset.
///
/// The pipeline never reprojects. It only refuses to combine inputs whose
/// tags differ, so every distance parameter (buffer width, capping radius)
/// is expressed in the linear unit of the tagged system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs(String);

impl Crs {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Shorthand for the usual `EPSG:<code>` form.
    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{code}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_shorthand() {
        assert_eq!(Crs::epsg(2154), Crs::new("EPSG:2154"));
        assert_eq!(Crs::epsg(2154).as_str(), "EPSG:2154");
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(Crs::new("EPSG:3857").to_string(), "EPSG:3857");
    }
}
