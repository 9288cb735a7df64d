use anyhow::Result;
use geom::{GPSBounds, LonLat, Pt2D};
use serde::{Deserialize, Serialize};

use crate::{IDMapping, StationCode, StationID};

#[derive(Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: StationID,
    pub code: StationCode,
    pub name: String,
    pub pos: Pt2D,
    // Overwritten in full every time traffic is aggregated
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
}

/// Reads a GBFS-style station information document. The bounds covering every
/// station define the map-space projection for everything else.
pub fn load<R: std::io::Read>(reader: R) -> Result<(Vec<Station>, GPSBounds)> {
    let doc: Document = serde_json::from_reader(reader)?;

    let mut gps_bounds = GPSBounds::new();
    for rec in &doc.data.stations {
        gps_bounds.update(LonLat::new(rec.lon, rec.lat));
    }

    let mut ids: IDMapping<StationCode, StationID> = IDMapping::new();
    let mut stations = Vec::new();
    for rec in doc.data.stations {
        let id = ids.insert_new(rec.short_name.clone())?;
        stations.push(Station {
            id,
            code: rec.short_name,
            name: rec.name,
            pos: LonLat::new(rec.lon, rec.lat).to_pt(&gps_bounds),
            arrivals: 0,
            departures: 0,
            total_traffic: 0,
        });
    }
    Ok((stations, gps_bounds))
}

#[derive(Deserialize)]
struct Document {
    data: Data,
}

#[derive(Deserialize)]
struct Data {
    stations: Vec<Record>,
}

// The feed carries more per station (capacity, region, rental methods); only
// these matter here.
#[derive(Deserialize)]
struct Record {
    short_name: StationCode,
    name: String,
    lon: f64,
    lat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_ignores_extra_fields() {
        let raw = r#"{"data": {"stations": [
            {"station_id": "1", "short_name": "A32000", "name": "Main St", "lon": -71.09, "lat": 42.36, "capacity": 15},
            {"station_id": "2", "short_name": "B32001", "name": "Harbor Point", "lon": -71.05, "lat": 42.35, "capacity": 20}
        ]}}"#;
        let (stations, _) = load(raw.as_bytes()).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Main St");
        assert_eq!(stations[0].code, StationCode::new("A32000".to_string()));
        assert_eq!(stations[0].total_traffic, 0);
    }

    #[test]
    fn duplicate_codes_rejected() {
        let raw = r#"{"data": {"stations": [
            {"short_name": "A32000", "name": "Main St", "lon": -71.09, "lat": 42.36},
            {"short_name": "A32000", "name": "Main St again", "lon": -71.08, "lat": 42.37}
        ]}}"#;
        assert!(load(raw.as_bytes()).is_err());
    }

    #[test]
    fn bounds_cover_all_stations() {
        let raw = r#"{"data": {"stations": [
            {"short_name": "A", "name": "One", "lon": -71.09, "lat": 42.36},
            {"short_name": "B", "name": "Two", "lon": -71.05, "lat": 42.40}
        ]}}"#;
        let (stations, gps_bounds) = load(raw.as_bytes()).unwrap();
        let bounds = gps_bounds.to_bounds();
        for station in &stations {
            assert!(station.pos.x() >= 0.0 && station.pos.x() <= bounds.max_x);
            assert!(station.pos.y() >= 0.0 && station.pos.y() <= bounds.max_y);
        }
    }
}
