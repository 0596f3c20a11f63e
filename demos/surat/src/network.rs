//! Synthetic Surat road network.
//!
//! A 7 × 7 grid of intersections spanning the old city and the western
//! suburbs.  Every third row and column is a 50 km/h arterial; the rest are
//! local streets with no posted speed.  Two wrinkles exercise the router:
//!
//! - the bottom row is one-way eastbound;
//! - the middle arterial has a parallel elevated flyover with a measured
//!   travel time.

use ed_core::{GeoPoint, NodeId};
use ed_spatial::{EdgeAttrs, RoadNetwork, RoadNetworkBuilder};

const SIZE: usize = 7;
const WEST_LON: f64 = 72.775;
const SOUTH_LAT: f64 = 21.165;
const STEP_DEG: f64 = 0.008;
const ARTERIAL_KPH: f64 = 50.0;
const METRES_PER_DEG_LAT: f64 = 111_195.0;

/// Build the grid.  With `impute` set, every edge gets a travel time before
/// the network is frozen.
pub fn build_network(impute: bool) -> RoadNetwork {
    let mut b = RoadNetworkBuilder::with_capacity(SIZE * SIZE, 4 * SIZE * SIZE);

    let mut grid = [[NodeId::INVALID; SIZE]; SIZE];
    for (row, nodes) in grid.iter_mut().enumerate() {
        for (col, node) in nodes.iter_mut().enumerate() {
            *node = b.add_node(GeoPoint::new(
                WEST_LON + col as f64 * STEP_DEG,
                SOUTH_LAT + row as f64 * STEP_DEG,
            ));
        }
    }

    let lon_len = segment_length_m(SOUTH_LAT, STEP_DEG, 0.0);
    let lat_len = segment_length_m(SOUTH_LAT, 0.0, STEP_DEG);

    for row in 0..SIZE {
        for col in 0..SIZE {
            let here = grid[row][col];
            if col + 1 < SIZE {
                let attrs = street(lon_len, row % 3 == 0);
                if row == 0 {
                    b.add_directed_edge(here, grid[row][col + 1], attrs);
                } else {
                    b.add_road(here, grid[row][col + 1], attrs);
                }
            }
            if row + 1 < SIZE {
                b.add_road(here, grid[row + 1][col], street(lat_len, col % 3 == 0));
            }
        }
    }

    // Flyover over the middle arterial: shorter and timed.
    let mid = SIZE / 2;
    for col in 0..SIZE - 1 {
        let flyover = EdgeAttrs::new(lon_len * 0.95).with_travel_time(lon_len * 0.95 / 16.0);
        b.add_road(grid[mid][col], grid[mid][col + 1], flyover);
    }

    if impute {
        b.impute_travel_times();
    }
    b.build()
}

fn street(length_m: f64, arterial: bool) -> EdgeAttrs {
    let attrs = EdgeAttrs::new(length_m);
    if arterial { attrs.with_speed(ARTERIAL_KPH) } else { attrs }
}

/// Equirectangular length of a small step at latitude `lat`.
fn segment_length_m(lat: f64, d_lon: f64, d_lat: f64) -> f64 {
    let x = d_lon * lat.to_radians().cos();
    (x * x + d_lat * d_lat).sqrt() * METRES_PER_DEG_LAT
}
