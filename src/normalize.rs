// src/normalize.rs

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{PartitionError, PartitionResult};
use crate::types::Site;

/// Minimum number of distinct generator points for a planar partition.
pub const MIN_DISTINCT_SITES: usize = 3;

/// Validates and deduplicates the raw site list.
///
/// Entries with non-finite coordinates are dropped, as are entries whose
/// coordinates compare equal to an earlier entry's (signed zeros included;
/// first occurrence wins). Input order is preserved so tessellation vertex
/// indices correlate deterministically with owner identity. Callers that
/// need per-owner attribution for coincident sites must pre-merge them.
pub fn normalize_sites(sites: &[Site]) -> PartitionResult<Vec<Site>> {
    let mut seen = HashSet::with_capacity(sites.len());
    let mut retained = Vec::with_capacity(sites.len());
    let mut non_finite = 0usize;
    let mut duplicates = 0usize;

    for site in sites {
        if !site.position.x.is_finite() || !site.position.y.is_finite() {
            non_finite += 1;
            continue;
        }
        // Adding 0.0 maps -0.0 onto +0.0 and leaves every other finite value
        // unchanged, so the key matches coordinate value equality.
        let key = (
            (site.position.x + 0.0).to_bits(),
            (site.position.y + 0.0).to_bits(),
        );
        if seen.insert(key) {
            retained.push(*site);
        } else {
            duplicates += 1;
        }
    }

    if non_finite > 0 {
        warn!("Dropped {} sites with non-finite coordinates", non_finite);
    }
    if duplicates > 0 {
        debug!("Dropped {} exact-coordinate duplicate sites", duplicates);
    }

    if retained.len() < MIN_DISTINCT_SITES {
        return Err(PartitionError::InsufficientPoints {
            expected: MIN_DISTINCT_SITES,
            actual: retained.len(),
        });
    }

    Ok(retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OwnerId;

    #[test]
    fn test_passthrough_keeps_order() {
        let sites = vec![
            Site::new(OwnerId(1), 0.0, 0.0),
            Site::new(OwnerId(2), 10.0, 0.0),
            Site::new(OwnerId(3), 0.0, 10.0),
        ];
        let normalized = normalize_sites(&sites).unwrap();
        assert_eq!(normalized, sites);
    }

    #[test]
    fn test_exact_duplicate_first_wins() {
        let sites = vec![
            Site::new(OwnerId(1), 0.0, 0.0),
            Site::new(OwnerId(2), 10.0, 0.0),
            Site::new(OwnerId(3), 0.0, 0.0),
            Site::new(OwnerId(4), 0.0, 10.0),
        ];
        let normalized = normalize_sites(&sites).unwrap();
        let owners: Vec<_> = normalized.iter().map(|s| s.owner).collect();
        assert_eq!(owners, vec![OwnerId(1), OwnerId(2), OwnerId(4)]);
    }

    #[test]
    fn test_signed_zero_duplicate_first_wins() {
        // -0.0 and 0.0 are the same coordinate even though their bit
        // patterns differ.
        let sites = vec![
            Site::new(OwnerId(1), 0.0, 5.0),
            Site::new(OwnerId(2), -0.0, 5.0),
            Site::new(OwnerId(3), 10.0, 0.0),
            Site::new(OwnerId(4), 0.0, 10.0),
        ];
        let normalized = normalize_sites(&sites).unwrap();
        let owners: Vec<_> = normalized.iter().map(|s| s.owner).collect();
        assert_eq!(owners, vec![OwnerId(1), OwnerId(3), OwnerId(4)]);
    }

    #[test]
    fn test_nearby_but_distinct_coordinates_survive() {
        let sites = vec![
            Site::new(OwnerId(1), 0.0, 0.0),
            Site::new(OwnerId(2), 0.0, f64::EPSILON),
            Site::new(OwnerId(3), 10.0, 0.0),
        ];
        assert_eq!(normalize_sites(&sites).unwrap().len(), 3);
    }

    #[test]
    fn test_non_finite_dropped() {
        let sites = vec![
            Site::new(OwnerId(1), f64::NAN, 0.0),
            Site::new(OwnerId(2), 0.0, f64::INFINITY),
            Site::new(OwnerId(3), 0.0, 0.0),
            Site::new(OwnerId(4), 10.0, 0.0),
            Site::new(OwnerId(5), 0.0, 10.0),
        ];
        let normalized = normalize_sites(&sites).unwrap();
        assert_eq!(normalized.len(), 3);
        assert!(normalized.iter().all(|s| s.owner != OwnerId(1) && s.owner != OwnerId(2)));
    }

    #[test]
    fn test_too_few_distinct_sites() {
        let sites = vec![
            Site::new(OwnerId(1), 0.0, 0.0),
            Site::new(OwnerId(2), 0.0, 0.0),
            Site::new(OwnerId(3), 10.0, 0.0),
        ];
        match normalize_sites(&sites) {
            Err(PartitionError::InsufficientPoints { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected InsufficientPoints, got {:?}", other),
        }
    }
}
