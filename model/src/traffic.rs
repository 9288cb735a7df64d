use abstutil::Counter;

use bikeshare::{Station, StationCode, Trip};

/// Restricts which trips get counted, by time of day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeFilter {
    Any,
    /// Minutes since midnight, in [0, 1439]
    Near(u16),
}

impl TimeFilter {
    /// A trip counts if it starts or ends within this many minutes of the
    /// target, inclusive.
    pub const WINDOW: u16 = 60;

    pub fn describe(self) -> String {
        match self {
            Self::Any => "(any time)".to_string(),
            Self::Near(minute) => {
                let hour = minute / 60;
                let (hour12, ampm) = match hour {
                    0 => (12, "AM"),
                    1..=11 => (hour, "AM"),
                    12 => (12, "PM"),
                    _ => (hour - 12, "PM"),
                };
                format!("{}:{:02} {}", hour12, minute % 60, ampm)
            }
        }
    }
}

pub fn filter_trips(trips: &[Trip], filter: TimeFilter) -> Vec<&Trip> {
    match filter {
        TimeFilter::Any => trips.iter().collect(),
        TimeFilter::Near(target) => trips
            .iter()
            .filter(|trip| near(trip.start_minute(), target) || near(trip.end_minute(), target))
            .collect(),
    }
}

// Flat distance on the 0-1439 scale. A trip just before midnight is NOT close
// to a filter just after it.
fn near(minute: u16, target: u16) -> bool {
    (i32::from(minute) - i32::from(target)).abs() <= i32::from(TimeFilter::WINDOW)
}

/// Recounts arrivals, departures, and total traffic for every station from
/// scratch. Trips mentioning a code that matches no station contribute to
/// nobody; stations no trip mentions get zeroes.
pub fn compute_station_traffic(stations: &mut [Station], trips: &[&Trip]) {
    let mut departures: Counter<StationCode> = Counter::new();
    let mut arrivals: Counter<StationCode> = Counter::new();
    for trip in trips {
        departures.inc(trip.start_station.clone());
        arrivals.inc(trip.end_station.clone());
    }

    for station in stations {
        // Always overwrite -- never blend in counts from the last filter
        station.departures = departures.get(station.code.clone());
        station.arrivals = arrivals.get(station.code.clone());
        station.total_traffic = station.departures + station.arrivals;
    }
}
