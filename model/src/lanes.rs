use anyhow::Result;
use geojson::{GeoJson, Value};
use geom::{Distance, GPSBounds, LonLat, PolyLine, Pt2D};

/// Bike lane networks arrive as GeoJSON. Keep just the line geometry; the
/// attributes (street names, facility types) aren't drawn.
pub fn load<R: std::io::Read>(mut reader: R, gps_bounds: &GPSBounds) -> Result<Vec<PolyLine>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let geojson: GeoJson = raw.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        _ => bail!("Expecting a FeatureCollection of bike lanes"),
    };

    let mut lanes = Vec::new();
    let mut skipped = 0;
    for feature in features {
        match feature.geometry.map(|geometry| geometry.value) {
            Some(Value::LineString(pts)) => {
                lanes.extend(to_polyline(&pts, gps_bounds));
            }
            Some(Value::MultiLineString(lines)) => {
                for pts in &lines {
                    lanes.extend(to_polyline(pts, gps_bounds));
                }
            }
            _ => {
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} features without line geometry");
    }
    Ok(lanes)
}

fn to_polyline(raw: &[Vec<f64>], gps_bounds: &GPSBounds) -> Option<PolyLine> {
    let pts: Vec<Pt2D> = raw
        .iter()
        .filter_map(|pt| match pt.as_slice() {
            [lon, lat, ..] => Some(LonLat::new(*lon, *lat).to_pt(gps_bounds)),
            _ => None,
        })
        .collect();
    let pts = Pt2D::approx_dedupe(pts, Distance::meters(1.0));
    if pts.len() < 2 {
        return None;
    }
    // Lanes can double back on themselves. We only draw them, so skip the
    // validation a route shape would get.
    Some(PolyLine::unchecked_new(pts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GPSBounds {
        let mut gps_bounds = GPSBounds::new();
        gps_bounds.update(LonLat::new(-71.2, 42.3));
        gps_bounds.update(LonLat::new(-71.0, 42.4));
        gps_bounds
    }

    #[test]
    fn lines_and_multilines_load() {
        let raw = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"STREET": "Beacon St"}, "geometry":
                {"type": "LineString", "coordinates": [[-71.10, 42.35], [-71.09, 42.35], [-71.08, 42.36]]}},
            {"type": "Feature", "properties": {}, "geometry":
                {"type": "MultiLineString", "coordinates": [
                    [[-71.12, 42.37], [-71.11, 42.37]],
                    [[-71.11, 42.38], [-71.10, 42.38]]]}}
        ]}"#;
        let lanes = load(raw.as_bytes(), &bounds()).unwrap();
        assert_eq!(lanes.len(), 3);
    }

    #[test]
    fn non_line_features_are_skipped() {
        let raw = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry":
                {"type": "Point", "coordinates": [-71.10, 42.35]}},
            {"type": "Feature", "properties": {}, "geometry":
                {"type": "LineString", "coordinates": [[-71.10, 42.35], [-71.09, 42.36]]}}
        ]}"#;
        let lanes = load(raw.as_bytes(), &bounds()).unwrap();
        assert_eq!(lanes.len(), 1);
    }

    #[test]
    fn degenerate_lines_are_dropped() {
        // Both points collapse to the same spot after deduping
        let raw = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry":
                {"type": "LineString", "coordinates": [[-71.10, 42.35], [-71.10, 42.35]]}}
        ]}"#;
        let lanes = load(raw.as_bytes(), &bounds()).unwrap();
        assert!(lanes.is_empty());
    }

    #[test]
    fn not_a_collection_is_an_error() {
        let raw = r#"{"type": "Feature", "properties": {}, "geometry":
            {"type": "LineString", "coordinates": [[-71.10, 42.35], [-71.09, 42.36]]}}"#;
        assert!(load(raw.as_bytes(), &bounds()).is_err());
    }
}
