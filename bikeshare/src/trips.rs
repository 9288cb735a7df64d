use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::StationCode;

#[derive(Clone, Serialize, Deserialize)]
pub struct Trip {
    pub start_station: StationCode,
    pub end_station: StationCode,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    /// Minutes since midnight, ignoring the date entirely
    pub fn start_minute(&self) -> u16 {
        minute_of_day(self.started_at)
    }

    pub fn end_minute(&self) -> u16 {
        minute_of_day(self.ended_at)
    }
}

fn minute_of_day(t: NaiveDateTime) -> u16 {
    (t.time().hour() * 60 + t.time().minute()) as u16
}

pub fn load<R: std::io::Read>(reader: R) -> Result<Vec<Trip>> {
    let mut trips = Vec::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec?;
        trips.push(Trip {
            start_station: rec.start_station_id,
            end_station: rec.end_station_id,
            started_at: parse_timestamp(&rec.started_at)?,
            ended_at: parse_timestamp(&rec.ended_at)?,
        });
    }
    Ok(trips)
}

// Some exports carry fractional seconds, some don't
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")?)
}

#[derive(Deserialize)]
struct Record {
    start_station_id: StationCode,
    end_station_id: StationCode,
    started_at: String,
    ended_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_with_extra_columns_and_fractional_seconds() {
        let raw = "\
ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id
abc123,classic_bike,2024-03-01 08:30:00,2024-03-01 08:47:12.331,A32000,B32001
def456,electric_bike,2024-03-02 17:05:59,2024-03-02 17:20:00,B32001,A32000
";
        let trips = load(raw.as_bytes()).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].start_minute(), 8 * 60 + 30);
        assert_eq!(trips[0].end_minute(), 8 * 60 + 47);
        assert_eq!(
            trips[1].end_station,
            StationCode::new("A32000".to_string())
        );
    }

    #[test]
    fn bad_timestamps_are_errors() {
        let raw = "\
started_at,ended_at,start_station_id,end_station_id
03/01/2024 08:30,03/01/2024 08:47,A32000,B32001
";
        assert!(load(raw.as_bytes()).is_err());
    }
}
