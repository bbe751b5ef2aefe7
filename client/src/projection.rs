use std::fmt::Write;

use pandemap_shared::MapFeature;

/// Equirectangular projection centered on a configurable longitude.
/// Longitudes wrap into `center_lon ± 180` so geometry straddling the
/// antimeridian (the Aleutians) stays on one side of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub center_lon: f64,
}

impl Projection {
    pub const fn new(center_lon: f64) -> Self {
        Self { center_lon }
    }

    /// Project lon/lat to map coordinates. Y grows downward (SVG).
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (wrap_delta(lon - self.center_lon), -lat)
    }
}

/// Wrap a longitude delta into [-180, 180).
fn wrap_delta(delta: f64) -> f64 {
    (delta + 540.0) % 360.0 - 180.0
}

/// Projected bounding box of a feature set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

pub fn feature_bounds(features: &[MapFeature], projection: &Projection) -> Option<Bounds> {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    let mut any = false;
    for feature in features {
        for ring in &feature.rings {
            for &(lon, lat) in ring {
                let (x, y) = projection.project(lon, lat);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                any = true;
            }
        }
    }
    any.then_some(Bounds {
        min_x,
        min_y,
        max_x,
        max_y,
    })
}

/// SVG viewBox string for a bounds with 5% padding on each side.
pub fn view_box(bounds: Bounds) -> String {
    let padding = 0.05;
    let width = bounds.max_x - bounds.min_x;
    let height = bounds.max_y - bounds.min_y;
    format!(
        "{:.2} {:.2} {:.2} {:.2}",
        bounds.min_x - width * padding,
        bounds.min_y - height * padding,
        width * (1.0 + padding * 2.0),
        height * (1.0 + padding * 2.0),
    )
}

/// SVG path data for one feature: one closed subpath per ring.
pub fn path_data(feature: &MapFeature, projection: &Projection) -> String {
    let mut d = String::new();
    for ring in &feature.rings {
        for (i, &(lon, lat)) in ring.iter().enumerate() {
            let (x, y) = projection.project(lon, lat);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{cmd}{x:.2},{y:.2}");
        }
        if !ring.is_empty() {
            d.push('Z');
        }
    }
    d
}

/// Outline of the projected sphere: the full equirectangular frame.
pub fn sphere_path() -> String {
    "M-180.00,-90.00L180.00,-90.00L180.00,90.00L-180.00,90.00Z".to_string()
}

/// Graticule: meridians every 10° as vertical lines, parallels every 10°
/// between ±80° as horizontal lines, in projected coordinates.
pub fn graticule_path() -> String {
    let mut d = String::new();
    let mut lon = -180;
    while lon <= 170 {
        let _ = write!(d, "M{lon}.00,-90.00L{lon}.00,90.00");
        lon += 10;
    }
    let mut lat = -80;
    while lat <= 80 {
        let _ = write!(d, "M-180.00,{y}.00L180.00,{y}.00", y = -lat);
        lat += 10;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(id: &str, coords: &[(f64, f64)]) -> MapFeature {
        MapFeature {
            id: id.to_string(),
            rings: vec![coords.to_vec()],
        }
    }

    #[test]
    fn projects_relative_to_center_with_inverted_latitude() {
        let projection = Projection::new(-96.0);
        assert_eq!(projection.project(-96.0, 38.0), (0.0, -38.0));
        assert_eq!(projection.project(-76.0, 40.0), (20.0, -40.0));
    }

    #[test]
    fn aleutian_longitudes_wrap_west_of_center() {
        let projection = Projection::new(-96.0);
        // +175°E is west of the continental US, not 271° east of it.
        let (x, _) = projection.project(175.0, 52.0);
        assert_eq!(x, -89.0);
    }

    #[test]
    fn world_center_keeps_edges_at_the_antimeridian() {
        let projection = Projection::new(10.0);
        let (x, _) = projection.project(-170.0, 0.0);
        assert_eq!(x, -180.0);
    }

    #[test]
    fn path_data_closes_each_ring() {
        let projection = Projection::new(0.0);
        let feature = triangle("T", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(
            path_data(&feature, &projection),
            "M0.00,-0.00L10.00,-0.00L10.00,-10.00Z"
        );
    }

    #[test]
    fn bounds_and_view_box_add_padding() {
        let projection = Projection::new(0.0);
        let features = vec![
            triangle("A", &[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]),
            triangle("B", &[(-20.0, -10.0), (0.0, -10.0), (0.0, 0.0)]),
        ];
        let bounds = feature_bounds(&features, &projection).unwrap();
        assert_eq!(bounds.min_x, -20.0);
        assert_eq!(bounds.max_x, 100.0);
        assert_eq!(bounds.min_y, -50.0);
        assert_eq!(bounds.max_y, 10.0);
        assert_eq!(view_box(bounds), "-26.00 -53.00 132.00 66.00");
    }

    #[test]
    fn empty_feature_set_has_no_bounds() {
        let projection = Projection::new(0.0);
        assert_eq!(feature_bounds(&[], &projection), None);
    }

    #[test]
    fn graticule_covers_meridians_and_parallels() {
        let d = graticule_path();
        let moves = d.matches('M').count();
        // 36 meridians, 17 parallels.
        assert_eq!(moves, 53);
        assert!(d.contains("M0.00,-90.00L0.00,90.00"));
        assert!(d.contains("M-180.00,0.00L180.00,0.00"));
    }
}
