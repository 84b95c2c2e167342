use geo_types::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, Value};

/// Planar buffer distance in degrees, roughly 100 m at the latitudes the
/// service covers.
pub const DEFAULT_BUFFER_DEGREES: f64 = 0.0009;

/// Segments used to approximate circular caps and point buffers.
const CIRCLE_SEGMENTS: usize = 16;

/// Coordinates closer than this are treated as duplicates.
const EPSILON: f64 = 1e-12;

/// Expand every feature in `fc` outward by `distance`, producing a polygonal
/// feature collection.
///
/// Pure and deterministic: identical input yields identical output. Empty
/// input yields an empty collection, and degenerate geometries (zero-length
/// lines, duplicate points) reduce to a minimal circle or are dropped rather
/// than failing.
pub fn buffer(fc: &FeatureCollection, distance: f64) -> FeatureCollection {
    let mut features = Vec::new();

    for feature in &fc.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        let Ok(geom) = Geometry::<f64>::try_from(geometry.value.clone()) else {
            continue;
        };
        let pieces = buffer_geometry(&geom, distance.abs());
        if pieces.0.is_empty() {
            continue;
        }
        features.push(Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(Value::from(&pieces))),
            id: None,
            properties: feature.properties.clone(),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn buffer_geometry(geom: &Geometry<f64>, distance: f64) -> MultiPolygon<f64> {
    match geom {
        Geometry::Point(p) => MultiPolygon(vec![circle(p.0, distance)]),
        Geometry::MultiPoint(mp) => {
            MultiPolygon(mp.iter().map(|p| circle(p.0, distance)).collect())
        }
        Geometry::Line(line) => {
            buffer_line(&[line.start, line.end], distance)
        }
        Geometry::LineString(ls) => buffer_line(&ls.0, distance),
        Geometry::MultiLineString(mls) => {
            let mut out = Vec::new();
            for ls in &mls.0 {
                out.extend(buffer_line(&ls.0, distance).0);
            }
            MultiPolygon(out)
        }
        Geometry::Polygon(poly) => buffer_polygon(poly, distance),
        Geometry::MultiPolygon(mp) => {
            let mut out = Vec::new();
            for poly in &mp.0 {
                out.extend(buffer_polygon(poly, distance).0);
            }
            MultiPolygon(out)
        }
        Geometry::GeometryCollection(gc) => {
            let mut out = Vec::new();
            for inner in &gc.0 {
                out.extend(buffer_geometry(inner, distance).0);
            }
            MultiPolygon(out)
        }
        _ => MultiPolygon(Vec::new()),
    }
}

/// Buffer an open polyline: a quad per segment plus a circle at every vertex
/// so joins and caps are covered. The pieces overlap instead of being
/// unioned, which is fine for display.
fn buffer_line(points: &[Coord<f64>], distance: f64) -> MultiPolygon<f64> {
    let pts = dedupe_consecutive(points);
    match pts.len() {
        0 => MultiPolygon(Vec::new()),
        // A degenerate line collapses to a minimal circle.
        1 => MultiPolygon(vec![circle(pts[0], distance)]),
        _ => {
            let mut out = Vec::with_capacity(pts.len() * 2 - 1);
            for p in &pts {
                out.push(circle(*p, distance));
            }
            for pair in pts.windows(2) {
                if let Some(quad) = segment_quad(pair[0], pair[1], distance) {
                    out.push(quad);
                }
            }
            MultiPolygon(out)
        }
    }
}

/// Buffer a polygon: the original interior plus a line buffer around every
/// ring, so the result strictly contains the input.
fn buffer_polygon(poly: &Polygon<f64>, distance: f64) -> MultiPolygon<f64> {
    let mut out = vec![poly.clone()];
    out.extend(buffer_line(&poly.exterior().0, distance).0);
    for ring in poly.interiors() {
        out.extend(buffer_line(&ring.0, distance).0);
    }
    MultiPolygon(out)
}

fn dedupe_consecutive(points: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if let Some(last) = out.last() {
            if (p.x - last.x).abs() < EPSILON && (p.y - last.y).abs() < EPSILON {
                continue;
            }
        }
        out.push(*p);
    }
    out
}

/// Regular n-gon approximating a circle of radius `r` around `center`.
fn circle(center: Coord<f64>, r: f64) -> Polygon<f64> {
    let n = CIRCLE_SEGMENTS;
    let mut coords = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
        coords.push((center.x + r * angle.cos(), center.y + r * angle.sin()));
    }
    coords.push(coords[0]);
    Polygon::new(LineString::from(coords), vec![])
}

/// Rectangle of half-width `r` around the segment `a -> b`, or `None` for a
/// zero-length segment.
fn segment_quad(a: Coord<f64>, b: Coord<f64>, r: f64) -> Option<Polygon<f64>> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < EPSILON {
        return None;
    }
    // Unit normal, left of the direction of travel.
    let nx = -dy / len * r;
    let ny = dx / len * r;
    let coords = vec![
        (a.x + nx, a.y + ny),
        (b.x + nx, b.y + ny),
        (b.x - nx, b.y - ny),
        (a.x - nx, a.y - ny),
        (a.x + nx, a.y + ny),
    ];
    Some(Polygon::new(LineString::from(coords), vec![]))
}

#[cfg(test)]
mod tests {
    use super::{CIRCLE_SEGMENTS, buffer};
    use crate::coord::empty_collection;
    use geojson::{Feature, FeatureCollection, Geometry, Value};
    use pretty_assertions::assert_eq;

    fn collection_of(value: Value) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(Geometry::new(value)),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        }
    }

    fn only_multipolygon(fc: &FeatureCollection) -> Vec<Vec<Vec<Vec<f64>>>> {
        assert_eq!(fc.features.len(), 1);
        match &fc.features[0].geometry.as_ref().expect("geometry").value {
            Value::MultiPolygon(polys) => polys.clone(),
            other => panic!("expected MultiPolygon, got {other:?}"),
        }
    }

    #[test]
    fn empty_collection_buffers_to_empty_collection() {
        let out = buffer(&empty_collection(), 0.001);
        assert!(out.features.is_empty());
    }

    #[test]
    fn point_buffers_to_closed_circle() {
        let fc = collection_of(Value::Point(vec![1.0, 2.0]));
        let polys = only_multipolygon(&buffer(&fc, 0.5));
        assert_eq!(polys.len(), 1);
        let ring = &polys[0][0];
        assert_eq!(ring.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());
        // Every ring vertex sits at the buffer radius.
        for v in &ring[..CIRCLE_SEGMENTS] {
            let d = ((v[0] - 1.0).powi(2) + (v[1] - 2.0).powi(2)).sqrt();
            assert!((d - 0.5).abs() < 1e-9, "vertex at distance {d}");
        }
    }

    #[test]
    fn line_buffers_to_caps_and_quad() {
        let fc = collection_of(Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
        ]));
        let polys = only_multipolygon(&buffer(&fc, 0.1));
        // Two vertex circles plus one segment quad.
        assert_eq!(polys.len(), 3);
    }

    #[test]
    fn zero_length_line_reduces_to_single_circle() {
        let fc = collection_of(Value::LineString(vec![
            vec![3.0, 4.0],
            vec![3.0, 4.0],
            vec![3.0, 4.0],
        ]));
        let polys = only_multipolygon(&buffer(&fc, 0.2));
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0][0].len(), CIRCLE_SEGMENTS + 1);
    }

    #[test]
    fn duplicate_interior_points_do_not_add_pieces() {
        let clean = collection_of(Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
        ]));
        let noisy = collection_of(Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
        ]));
        assert_eq!(buffer(&clean, 0.1), buffer(&noisy, 0.1));
    }

    #[test]
    fn buffer_is_deterministic() {
        let fc = collection_of(Value::LineString(vec![
            vec![-6.27, 53.33],
            vec![-6.26, 53.34],
            vec![-6.25, 53.33],
        ]));
        assert_eq!(buffer(&fc, 0.0009), buffer(&fc, 0.0009));
    }

    #[test]
    fn preserves_feature_properties() {
        let mut fc = collection_of(Value::Point(vec![0.0, 0.0]));
        let mut props = geojson::JsonObject::new();
        props.insert("name".to_string(), serde_json::json!("Grafton Street"));
        fc.features[0].properties = Some(props.clone());

        let out = buffer(&fc, 0.1);
        assert_eq!(out.features[0].properties, Some(props));
    }

    #[test]
    fn feature_without_geometry_is_dropped() {
        let fc = FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: None,
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        };
        assert!(buffer(&fc, 0.1).features.is_empty());
    }
}
