// src/dissolve.rs

use std::collections::HashMap;

use geo::{MultiPolygon, unary_union};
use tracing::debug;

use crate::clip::ClippedCell;
use crate::types::{AddressId, OwnerId, ServiceArea, Site};

/// Builds the final records from the clipped cells.
///
/// With `dissolve`, cells sharing an owner are grouped in first-encounter
/// order and each group's parts are unioned into a single geometry; the
/// record keeps the address reference of the owner's first site in
/// normalized order and drops the rest (documented attribute policy).
/// Without `dissolve` there is one record per clipped cell, so an owner
/// with several distinct addresses appears several times.
pub fn aggregate(cells: Vec<ClippedCell>, sites: &[Site], dissolve: bool) -> Vec<ServiceArea> {
    if !dissolve {
        return cells
            .into_iter()
            .map(|cell| {
                let site = &sites[cell.site_index];
                ServiceArea {
                    owner: site.owner,
                    address: site.address,
                    geometry: cell.parts,
                }
            })
            .collect();
    }

    let cell_count = cells.len();
    let mut index_by_owner: HashMap<OwnerId, usize> = HashMap::new();
    let mut groups: Vec<(OwnerId, Option<AddressId>, Vec<MultiPolygon<f64>>)> = Vec::new();

    for cell in cells {
        let site = &sites[cell.site_index];
        match index_by_owner.get(&site.owner) {
            Some(&i) => groups[i].2.push(cell.parts),
            None => {
                index_by_owner.insert(site.owner, groups.len());
                groups.push((site.owner, site.address, vec![cell.parts]));
            }
        }
    }

    debug!("Dissolved {} cells into {} service areas", cell_count, groups.len());

    groups
        .into_iter()
        .map(|(owner, address, mut parts)| {
            let geometry = match parts.len() {
                1 => parts.swap_remove(0),
                _ => unary_union(parts.iter()),
            };
            ServiceArea {
                owner,
                address,
                geometry,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Area, Coord, LineString, Polygon};

    fn square_parts(min: f64, max: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![Polygon::new(
            LineString::from(vec![
                Coord { x: min, y: min },
                Coord { x: max, y: min },
                Coord { x: max, y: max },
                Coord { x: min, y: max },
            ]),
            vec![],
        )])
    }

    fn make_sites() -> Vec<Site> {
        vec![
            Site::new(OwnerId(10), 0.0, 0.0).with_address(AddressId(100)),
            Site::new(OwnerId(20), 50.0, 0.0).with_address(AddressId(200)),
            Site::new(OwnerId(10), 100.0, 0.0).with_address(AddressId(101)),
        ]
    }

    fn make_cells() -> Vec<ClippedCell> {
        vec![
            ClippedCell {
                site_index: 0,
                parts: square_parts(0.0, 10.0),
            },
            ClippedCell {
                site_index: 1,
                parts: square_parts(40.0, 60.0),
            },
            ClippedCell {
                site_index: 2,
                parts: square_parts(90.0, 110.0),
            },
        ]
    }

    #[test]
    fn test_without_dissolve_one_record_per_cell() {
        let sites = make_sites();
        let areas = aggregate(make_cells(), &sites, false);

        assert_eq!(areas.len(), 3);
        let owners: Vec<_> = areas.iter().map(|a| a.owner).collect();
        assert_eq!(owners, vec![OwnerId(10), OwnerId(20), OwnerId(10)]);
        assert_eq!(areas[2].address, Some(AddressId(101)));
    }

    #[test]
    fn test_dissolve_groups_in_first_encounter_order() {
        let sites = make_sites();
        let areas = aggregate(make_cells(), &sites, true);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].owner, OwnerId(10));
        assert_eq!(areas[1].owner, OwnerId(20));
        // First-encountered address wins for the dissolved owner.
        assert_eq!(areas[0].address, Some(AddressId(100)));
        assert_eq!(areas[1].address, Some(AddressId(200)));
    }

    #[test]
    fn test_dissolve_preserves_total_area() {
        let sites = make_sites();
        let cells = make_cells();
        let total: f64 = cells.iter().map(|c| c.parts.unsigned_area()).sum();

        let areas = aggregate(cells, &sites, true);
        let dissolved: f64 = areas.iter().map(|a| a.geometry.unsigned_area()).sum();
        assert_relative_eq!(dissolved, total, epsilon = 1e-6);
    }

    #[test]
    fn test_dissolved_disjoint_parts_stay_multi_part() {
        let sites = make_sites();
        let areas = aggregate(make_cells(), &sites, true);
        let owner_ten = &areas[0];
        assert_eq!(owner_ten.geometry.0.len(), 2, "disjoint cells stay separate parts");
    }
}
