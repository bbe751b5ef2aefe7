use geojson::{Feature, GeoJson, Value};

use crate::source::FeatureIdScheme;

/// One renderable topology feature: its resolver identifier and polygon
/// rings in lon/lat order. MultiPolygon rings are flattened; holes render
/// through even-odd filling.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub id: String,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Parse result. `skipped` counts features dropped for a missing id or an
/// unsupported geometry kind; the caller reports it, rendering continues.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub features: Vec<MapFeature>,
    pub skipped: usize,
}

pub fn parse_topology(raw: &str, scheme: FeatureIdScheme) -> Result<Topology, String> {
    let geojson: GeoJson = raw
        .parse()
        .map_err(|e| format!("topology parse error: {e}"))?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err("topology is not a feature collection".to_string());
    };

    let mut features = Vec::with_capacity(collection.features.len());
    let mut skipped = 0;
    for feature in &collection.features {
        match (feature_id(feature, scheme), feature_rings(feature)) {
            (Some(id), Some(rings)) if !rings.is_empty() => {
                features.push(MapFeature { id, rings });
            }
            _ => skipped += 1,
        }
    }

    Ok(Topology { features, skipped })
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .and_then(|value| value.as_str())
        .map(str::to_string)
}

/// Resolver identifier per scheme: county features carry the combined
/// FIPS as their id (or split across STATEFP/COUNTYFP properties), world
/// features carry an ISO_A2 property.
fn feature_id(feature: &Feature, scheme: FeatureIdScheme) -> Option<String> {
    match scheme {
        FeatureIdScheme::CountyFips => {
            let from_id = feature.id.as_ref().map(|id| match id {
                geojson::feature::Id::String(s) => s.clone(),
                geojson::feature::Id::Number(n) => n.to_string(),
            });
            from_id.or_else(|| {
                let state = string_property(feature, "STATEFP")?;
                let county = string_property(feature, "COUNTYFP")?;
                Some(format!("{state}{county}"))
            })
        }
        FeatureIdScheme::CountryIso => string_property(feature, "ISO_A2"),
    }
}

fn ring_coords(ring: &[Vec<f64>]) -> Vec<(f64, f64)> {
    ring.iter()
        .filter(|position| position.len() >= 2)
        .map(|position| (position[0], position[1]))
        .collect()
}

fn feature_rings(feature: &Feature) -> Option<Vec<Vec<(f64, f64)>>> {
    let geometry = feature.geometry.as_ref()?;
    match &geometry.value {
        Value::Polygon(polygon) => Some(polygon.iter().map(|r| ring_coords(r)).collect()),
        Value::MultiPolygon(polygons) => Some(
            polygons
                .iter()
                .flat_map(|polygon| polygon.iter().map(|r| ring_coords(r)))
                .collect(),
        ),
        _ => None,
    }
}
