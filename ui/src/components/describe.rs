use abstutil::prettyprint_usize;
use widgetry::{Line, Text};

use bikeshare::Station;

pub fn station(station: &Station) -> Text {
    let mut txt = Text::from(Line(&station.name));
    txt.add_line(Line(format!(
        "{} trips ({} departures, {} arrivals)",
        prettyprint_usize(station.total_traffic),
        prettyprint_usize(station.departures),
        prettyprint_usize(station.arrivals)
    )));
    txt.add_line(Line(format!("Code: {:?}", station.code)));
    txt
}
