use geo::line_string;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::segment::CostedSegment;
use crate::error::Error;

/// Converts a segment list to a GeoJSON `FeatureCollection`, one
/// two-point `LineString` feature per segment with the interpolated
/// costs as properties.
pub fn segments_to_geojson(segments: &[CostedSegment]) -> Result<FeatureCollection, Error> {
    let features = segments
        .iter()
        .map(segment_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

fn segment_feature(segment: &CostedSegment) -> Result<Feature, Error> {
    let line = line_string![
        (x: segment.from.lon, y: segment.from.lat),
        (x: segment.to.lon, y: segment.to.lat)
    ];
    let geometry = Geometry::new(GeoJsonValue::from(&line));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "from_cost": segment.from.cost,
            "to_cost": segment.to.cost,
        }
    });

    serde_json::from_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
