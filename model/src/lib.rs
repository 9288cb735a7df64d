#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod lanes;
mod scale;
mod traffic;

use anyhow::Result;
use fs_err::File;
use geom::{Bounds, GPSBounds, PolyLine, Pt2D};
use serde::{Deserialize, Serialize};

use bikeshare::{Station, Trip};

pub use self::scale::{departure_ratio_bucket, RadiusScale};
pub use self::traffic::{compute_station_traffic, filter_trips, TimeFilter};

/// Everything loaded once at startup. Trips and bike lanes are read-only
/// afterwards; only the derived traffic counts on stations change, and only
/// when the time filter does.
#[derive(Serialize, Deserialize)]
pub struct Model {
    pub bounds: Bounds,
    pub gps_bounds: GPSBounds,
    pub stations: Vec<Station>,
    pub trips: Vec<Trip>,
    pub bike_lanes: Vec<PolyLine>,
}

impl Model {
    pub fn import(stations_path: &str, trips_path: &str, lane_paths: &[String]) -> Result<Self> {
        let (stations, gps_bounds) = bikeshare::stations::load(File::open(stations_path)?)?;
        info!("Loaded {} stations from {stations_path}", stations.len());

        let trips = bikeshare::trips::load(File::open(trips_path)?)?;
        info!("Loaded {} trips from {trips_path}", trips.len());

        let mut bike_lanes = Vec::new();
        for path in lane_paths {
            // Lanes are projected with the bounds the stations established;
            // geometry a bit outside them still draws fine.
            let lanes = lanes::load(File::open(path)?, &gps_bounds)?;
            info!("Loaded {} bike lane segments from {path}", lanes.len());
            bike_lanes.extend(lanes);
        }

        Ok(Self {
            bounds: gps_bounds.to_bounds(),
            gps_bounds,
            stations,
            trips,
            bike_lanes,
        })
    }

    pub fn empty() -> Self {
        Self {
            // Avoid crashing the UI with empty bounds
            bounds: Bounds::from(&[Pt2D::zero(), Pt2D::new(1.0, 1.0)]),
            gps_bounds: GPSBounds::new(),
            stations: Vec::new(),
            trips: Vec::new(),
            bike_lanes: Vec::new(),
        }
    }
}
