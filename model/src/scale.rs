use bikeshare::Station;

use crate::TimeFilter;

/// Maps a station's total traffic to a circle radius. Square-root, so circle
/// AREA tracks the count. Filtered views have much lower counts per station,
/// so they get a legible floor and a taller ceiling.
pub struct RadiusScale {
    max_traffic: usize,
    min_radius: f64,
    max_radius: f64,
}

impl RadiusScale {
    pub fn new(stations: &[Station], filter: TimeFilter) -> Self {
        let max_traffic = stations.iter().map(|s| s.total_traffic).max().unwrap_or(0);
        let (min_radius, max_radius) = match filter {
            TimeFilter::Any => (0.0, 25.0),
            TimeFilter::Near(_) => (3.0, 50.0),
        };
        Self {
            max_traffic,
            min_radius,
            max_radius,
        }
    }

    pub fn radius(&self, total_traffic: usize) -> f64 {
        if self.max_traffic == 0 {
            return self.min_radius;
        }
        let pct = (total_traffic as f64 / self.max_traffic as f64).sqrt();
        self.min_radius + pct * (self.max_radius - self.min_radius)
    }
}

/// Quantizes departures / total_traffic into three buckets: 0 is
/// arrival-heavy, 0.5 balanced, 1 departure-heavy. A station with no traffic
/// sits at the balanced midpoint instead of dividing by zero.
pub fn departure_ratio_bucket(station: &Station) -> f64 {
    if station.total_traffic == 0 {
        return 0.5;
    }
    let ratio = station.departures as f64 / station.total_traffic as f64;
    // Thirds of [0, 1] map to the three buckets
    let bucket = (ratio * 3.0).floor().min(2.0);
    bucket / 2.0
}

#[cfg(test)]
mod tests {
    use geom::Pt2D;

    use bikeshare::{CheapID, StationCode, StationID};

    use super::*;

    fn station(departures: usize, arrivals: usize) -> Station {
        Station {
            id: StationID::new(0),
            code: StationCode::new("A32000".to_string()),
            name: "Main St".to_string(),
            pos: Pt2D::zero(),
            arrivals,
            departures,
            total_traffic: departures + arrivals,
        }
    }

    #[test]
    fn radius_endpoints() {
        let stations = vec![station(50, 50), station(0, 0)];

        let unfiltered = RadiusScale::new(&stations, TimeFilter::Any);
        assert_eq!(unfiltered.radius(0), 0.0);
        assert_eq!(unfiltered.radius(100), 25.0);

        let filtered = RadiusScale::new(&stations, TimeFilter::Near(500));
        assert_eq!(filtered.radius(0), 3.0);
        assert_eq!(filtered.radius(100), 50.0);
    }

    #[test]
    fn radius_follows_square_root() {
        let stations = vec![station(50, 50)];
        let scale = RadiusScale::new(&stations, TimeFilter::Any);
        // A quarter of the max traffic gets half the max radius
        assert_eq!(scale.radius(25), 12.5);
    }

    #[test]
    fn zero_max_traffic_means_minimum_everywhere() {
        let stations = vec![station(0, 0)];
        let scale = RadiusScale::new(&stations, TimeFilter::Near(500));
        assert_eq!(scale.radius(0), 3.0);
    }

    #[test]
    fn ratio_buckets() {
        // 3 departures out of 4 trips
        assert_eq!(departure_ratio_bucket(&station(3, 1)), 1.0);
        // Perfectly balanced
        assert_eq!(departure_ratio_bucket(&station(2, 2)), 0.5);
        // All arrivals
        assert_eq!(departure_ratio_bucket(&station(0, 5)), 0.0);
        // All departures
        assert_eq!(departure_ratio_bucket(&station(5, 0)), 1.0);
        // One departure in five trips, just under the first third
        assert_eq!(departure_ratio_bucket(&station(1, 4)), 0.0);
    }

    #[test]
    fn no_traffic_defaults_to_balanced() {
        assert_eq!(departure_ratio_bucket(&station(0, 0)), 0.5);
    }
}
